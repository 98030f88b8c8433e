//! Built-in match kinds and the pattern + refiner chain for each.
//!
//! This is the registry the CLI resolves a `--type` against. Every kind
//! bundles a compiled pattern with the refiners applied to its matches, so
//! callers never pair them up by hand.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::HintError;
use crate::refine::{self, Refiner};

/// Matches whole lines; also the default for `--type=regex`.
pub const DEFAULT_REGEX: &str = r"(?m)^\s*(.+)\s*$";

pub const DEFAULT_URL_PREFIXES: &str = "file,ftp,http,https";

pub const DEFAULT_WORD_CHARACTERS: &str = "@-./_~?&=%+#";

/// Anything a path or URL plausibly ends before: controls (including the
/// filler marker), whitespace, and common enclosing punctuation.
const URL_DELIMITERS: &str = r#"\x00-\x20\x7f<>"'"#;

const PATH_PATTERN: &str = r"(?:\S*/\S+)|(?:\S+[.][a-zA-Z0-9]{2,7})";

const LINE_PATTERN: &str = "(?m)^\\s*(.+)[\\s\\x00]*$";

const HASH_PATTERN: &str = "[0-9a-f]{7,128}";

/// `path:line` error locations, with both parts captured by name.
const LINENUM_PATTERN: &str = r"(?P<path>(?:\S*/\S+)|(?:\S+[.][a-zA-Z0-9]{2,7})):(?P<line>\d+)";

/// What kind of text to hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Url,
    Path,
    Line,
    Hash,
    Word,
    Regex,
    Linenum,
}

/// Knobs consulted when building a pattern.
#[derive(Debug, Clone)]
pub struct PatternOptions {
    /// User pattern for `Regex` (and `Linenum` when overridden).
    pub regex: String,
    /// Comma separated URL schemes for `Url`.
    pub url_prefixes: String,
    /// Extra characters treated as part of a word for `Word`.
    pub word_characters: String,
    /// Lower bound baked into patterns that support it.
    pub minimum_match_length: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            regex: DEFAULT_REGEX.to_string(),
            url_prefixes: DEFAULT_URL_PREFIXES.to_string(),
            word_characters: DEFAULT_WORD_CHARACTERS.to_string(),
            minimum_match_length: 3,
        }
    }
}

/// A compiled pattern plus the refiner chain for its matches.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub pattern: Regex,
    pub refiners: Vec<Refiner>,
}

impl PatternSpec {
    /// Resolve a match kind to its pattern and refiners.
    pub fn for_kind(kind: MatchKind, opts: &PatternOptions) -> Result<Self, HintError> {
        let (pattern, refiners): (String, Vec<Refiner>) = match kind {
            MatchKind::Url => (url_pattern(&opts.url_prefixes), vec![refine::url]),
            MatchKind::Path => (
                PATH_PATTERN.to_string(),
                vec![refine::brackets, refine::quotes],
            ),
            MatchKind::Line => (LINE_PATTERN.to_string(), Vec::new()),
            MatchKind::Hash => (HASH_PATTERN.to_string(), Vec::new()),
            MatchKind::Word => (
                word_pattern(&opts.word_characters, opts.minimum_match_length),
                vec![refine::brackets, refine::quotes],
            ),
            MatchKind::Regex => (opts.regex.clone(), Vec::new()),
            MatchKind::Linenum => {
                // Honor a user regex with named path/line groups, else the
                // built-in error-location pattern.
                let pattern = if opts.regex == DEFAULT_REGEX {
                    LINENUM_PATTERN.to_string()
                } else {
                    opts.regex.clone()
                };
                (pattern, vec![refine::brackets, refine::quotes])
            }
        };
        Ok(Self {
            pattern: Regex::new(&pattern)?,
            refiners,
        })
    }
}

fn url_pattern(prefixes: &str) -> String {
    let schemes: Vec<&str> = prefixes.split(',').filter(|s| !s.is_empty()).collect();
    format!("(?:{})://[^{}]{{3,}}", schemes.join("|"), URL_DELIMITERS)
}

fn word_pattern(word_characters: &str, minimum_match_length: usize) -> String {
    format!(
        r"[{}\w]{{{},}}",
        escape_class(word_characters),
        minimum_match_length.max(1)
    )
}

/// Escape characters that are special inside a regex character class.
fn escape_class(chars: &str) -> String {
    let mut out = String::with_capacity(chars.len() * 2);
    for c in chars.chars() {
        if matches!(c, '\\' | '-' | ']' | '[' | '^' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::extract;

    fn texts(spec: &PatternSpec, text: &str, min: usize) -> Vec<String> {
        extract(&spec.pattern, &spec.refiners, text, min)
            .into_iter()
            .map(|m| m.text)
            .collect()
    }

    #[test]
    fn url_kind_finds_and_refines_urls() {
        // Trailing sentence punctuation is not part of the URL.
        let spec = PatternSpec::for_kind(MatchKind::Url, &PatternOptions::default()).unwrap();
        let found = texts(&spec, "visit http://example.com/page. now", 3);
        assert_eq!(found, ["http://example.com/page"]);
    }

    #[test]
    fn url_kind_respects_configured_prefixes() {
        let opts = PatternOptions {
            url_prefixes: "gopher".to_string(),
            ..PatternOptions::default()
        };
        let spec = PatternSpec::for_kind(MatchKind::Url, &opts).unwrap();
        let found = texts(&spec, "http://a.io gopher://b.io/page", 3);
        assert_eq!(found, ["gopher://b.io/page"]);
    }

    #[test]
    fn path_kind_strips_enclosing_brackets() {
        let spec = PatternSpec::for_kind(MatchKind::Path, &PatternOptions::default()).unwrap();
        let found = texts(&spec, "(see foo.txt)", 3);
        assert_eq!(found, ["foo.txt"]);
    }

    #[test]
    fn path_kind_matches_slashed_paths() {
        let spec = PatternSpec::for_kind(MatchKind::Path, &PatternOptions::default()).unwrap();
        let found = texts(&spec, "ls /usr/local/bin please", 3);
        assert_eq!(found, ["/usr/local/bin"]);
    }

    #[test]
    fn line_kind_selects_trimmed_lines() {
        let spec = PatternSpec::for_kind(MatchKind::Line, &PatternOptions::default()).unwrap();
        let found = texts(&spec, "  first line\0\0\nsecond\0\0\0", 3);
        assert_eq!(found, ["first line", "second"]);
    }

    #[test]
    fn hash_kind_wants_at_least_seven_hex_digits() {
        let spec = PatternSpec::for_kind(MatchKind::Hash, &PatternOptions::default()).unwrap();
        let found = texts(&spec, "commit deadbeef123 and abc123", 3);
        assert_eq!(found, ["deadbeef123"]);
    }

    #[test]
    fn word_kind_honors_extra_word_characters() {
        let spec = PatternSpec::for_kind(MatchKind::Word, &PatternOptions::default()).unwrap();
        let found = texts(&spec, "open ~/notes/todo.md now!", 3);
        assert!(found.contains(&"~/notes/todo.md".to_string()));
    }

    #[test]
    fn regex_kind_defaults_to_whole_lines() {
        let spec = PatternSpec::for_kind(MatchKind::Regex, &PatternOptions::default()).unwrap();
        let found = texts(&spec, "one line\nanother", 3);
        assert_eq!(found, ["one line", "another"]);
    }

    #[test]
    fn linenum_kind_captures_path_and_line() {
        let spec = PatternSpec::for_kind(MatchKind::Linenum, &PatternOptions::default()).unwrap();
        let matches = extract(
            &spec.pattern,
            &spec.refiners,
            "error: src/main.rs:42: oh no",
            3,
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].groups["path"], "src/main.rs");
        assert_eq!(matches[0].groups["line"], "42");
    }

    #[test]
    fn bad_user_regex_is_a_startup_error() {
        let opts = PatternOptions {
            regex: "(".to_string(),
            ..PatternOptions::default()
        };
        assert!(PatternSpec::for_kind(MatchKind::Regex, &opts).is_err());
    }

    #[test]
    fn match_kind_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&MatchKind::Linenum).unwrap(),
            "\"linenum\""
        );
        assert_eq!(serde_json::to_string(&MatchKind::Url).unwrap(), "\"url\"");
    }

    #[test]
    fn escape_class_neutralizes_class_metacharacters() {
        let pattern = format!("[{}]+", escape_class(r"a-]\^"));
        let re = Regex::new(&pattern).unwrap();
        assert!(re.is_match("a-]"));
        assert!(!re.is_match("b"));
    }
}
