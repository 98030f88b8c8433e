//! CLI argument parsing with clap derive macros.

use clap::{Parser, ValueEnum};
use hintpick_core::patterns::{
    MatchKind, DEFAULT_REGEX, DEFAULT_URL_PREFIXES, DEFAULT_WORD_CHARACTERS,
};

/// Select text from the screen using the keyboard.
///
/// Reads captured screen text on STDIN, overlays a short label on every
/// match, and prints the chosen text on STDOUT once a label is typed.
/// Defaults to searching for URLs.
#[derive(Debug, Parser)]
#[command(name = "hintpick", version)]
#[command(after_help = "\
Examples:
  capture | hintpick                          # Pick a URL
  capture | hintpick --type path              # Pick a file path
  capture | hintpick --type word --multiple   # Collect several words, Esc to finish
  capture | hintpick --type regex --regex '[0-9]+'
  capture | hintpick --type linenum --program 'vim +{line} {path}'

Keys:
  label chars   Narrow the candidates; a unique prefix selects immediately
  Enter         Select the exactly-typed label
  Backspace     Undo the last typed character
  Esc           Finish (multi-select) or cancel
  Ctrl+C/Ctrl+D Cancel")]
pub struct Cli {
    /// The type of text to search for
    #[arg(short = 't', long = "type", value_enum, default_value_t = MatchType::Url)]
    pub match_type: MatchType,

    /// Regular expression used when --type=regex. A numbered group narrows
    /// the match to just that group; named groups are carried into the result
    #[arg(long, default_value = DEFAULT_REGEX)]
    pub regex: String,

    /// Comma separated list of recognized URL prefixes
    #[arg(long, default_value = DEFAULT_URL_PREFIXES)]
    pub url_prefixes: String,

    /// Characters considered part of a word, in addition to alphanumerics
    #[arg(long, default_value = DEFAULT_WORD_CHARACTERS)]
    pub word_characters: String,

    /// Minimum number of characters for a span to count as a match
    #[arg(long, default_value_t = 3)]
    pub minimum_match_length: usize,

    /// Select multiple matches; press Esc to finish
    #[arg(short, long)]
    pub multiple: bool,

    /// How multiple selections are joined: auto, space, newline, empty,
    /// json, or a zero-based index into the selections (negative = from end)
    #[arg(long, default_value = "auto")]
    pub multiple_joiner: String,

    /// Append a trailing space to each returned match
    #[arg(long, value_enum, default_value_t = TrailingSpace::Auto)]
    pub add_trailing_space: TrailingSpace,

    /// Number given to the first hint. Values below zero clamp to zero
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub hints_offset: isize,

    /// Characters to use for hint labels [default: digits then a-z]
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Number hints upward from the top of the screen instead of downward
    #[arg(long)]
    pub ascending: bool,

    /// Program to run with each selection (repeatable). For --type=linenum
    /// the placeholders {path} and {line} are substituted. '-' prints the
    /// selection to stdout instead
    #[arg(long)]
    pub program: Vec<String>,

    /// Result format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchType {
    /// URLs with a recognized prefix
    Url,
    /// File system paths
    Path,
    /// Whole lines
    Line,
    /// Hex hashes (7 to 128 digits)
    Hash,
    /// Words built from alphanumerics and --word-characters
    Word,
    /// Whatever --regex matches
    Regex,
    /// path:line error locations
    Linenum,
}

impl From<MatchType> for MatchKind {
    fn from(value: MatchType) -> Self {
        match value {
            MatchType::Url => MatchKind::Url,
            MatchType::Path => MatchKind::Path,
            MatchType::Line => MatchKind::Line,
            MatchType::Hash => MatchKind::Hash,
            MatchType::Word => MatchKind::Word,
            MatchType::Regex => MatchKind::Regex,
            MatchType::Linenum => MatchKind::Linenum,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrailingSpace {
    /// Add the space only in multi-select mode
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The joined selection text
    Text,
    /// A JSON payload with matches, captured groups, and configuration
    Json,
}
