//! hintpick entry point.

mod args;
mod output;
mod tty;

use std::io::{IsTerminal, Read};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;

use hintpick_core::hints::Alphabet;
use hintpick_core::matcher;
use hintpick_core::normalize;
use hintpick_core::patterns::{MatchKind, PatternOptions, PatternSpec};
use hintpick_core::select::{assign_indices, Outcome, Selector};

use crate::args::Cli;

fn main() {
    // Diagnostics go to stderr; stdout is reserved for the result.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("pass the text to be hinted on STDIN");
    }
    let mut raw = String::new();
    stdin
        .read_to_string(&mut raw)
        .context("reading captured text from STDIN")?;

    let cols = tty::screen_columns()?;
    run_pipeline(&raw, cols, &cli, tty::run)
}

/// Everything after input acquisition: normalize, extract, and hand the
/// selector to `drive` for the interactive part. The terminal loop is a
/// parameter so the no-candidates path can run without a tty.
fn run_pipeline(
    raw: &str,
    cols: usize,
    cli: &Cli,
    drive: impl FnOnce(&mut Selector, &str) -> Result<Outcome>,
) -> Result<i32> {
    let text = normalize::normalize(raw, cols);
    debug!(cols, bytes = text.len(), "normalized captured text");

    let kind = MatchKind::from(cli.match_type);
    let opts = PatternOptions {
        regex: cli.regex.clone(),
        url_prefixes: cli.url_prefixes.clone(),
        word_characters: cli.word_characters.clone(),
        minimum_match_length: cli.minimum_match_length,
    };
    let spec = PatternSpec::for_kind(kind, &opts)?;
    let matches = matcher::extract(
        &spec.pattern,
        &spec.refiners,
        &text,
        cli.minimum_match_length,
    );
    if matches.is_empty() {
        // Not an error: the run completed and found nothing.
        let what = if kind == MatchKind::Url {
            "URLs"
        } else {
            "matches"
        };
        eprintln!("No {what} found.");
        return Ok(0);
    }

    let alphabet = match &cli.alphabet {
        Some(symbols) => Alphabet::new(symbols)?,
        None => Alphabet::default(),
    };
    let matches = assign_indices(matches, cli.ascending, cli.hints_offset);

    let title = if kind == MatchKind::Url {
        "Choose URL"
    } else {
        "Choose text"
    };
    let mut selector = Selector::new(text, matches, alphabet, cli.multiple);

    match drive(&mut selector, title)? {
        Outcome::Cancelled => Ok(1),
        _ => {
            output::emit(cli, kind, selector.chosen())?;
            Ok(0)
        }
    }
}
