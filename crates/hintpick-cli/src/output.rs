//! Result hand-off: suffixing, joining, and emitting the chosen matches.
//!
//! Cancellation never reaches this module; it only runs after a successful
//! selection, and stdout carries nothing but the result.

use std::collections::BTreeMap;
use std::process::Command;

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use hintpick_core::matcher::Match;
use hintpick_core::patterns::MatchKind;

use crate::args::{Cli, OutputFormat, TrailingSpace};

/// Everything the caller needs to interpret a selection.
#[derive(Debug, Serialize)]
pub struct ResultPayload {
    pub kind: MatchKind,
    pub matches: Vec<String>,
    pub groups: Vec<BTreeMap<String, String>>,
    pub programs: Vec<String>,
    pub multiple_joiner: String,
}

/// Emit the chosen matches per the configured policies.
pub fn emit(cli: &Cli, kind: MatchKind, chosen: &[Match]) -> Result<()> {
    if chosen.is_empty() {
        return Ok(());
    }

    let suffix = match cli.add_trailing_space {
        TrailingSpace::Always => " ",
        TrailingSpace::Never => "",
        TrailingSpace::Auto => {
            if cli.multiple {
                " "
            } else {
                ""
            }
        }
    };
    let texts: Vec<String> = chosen
        .iter()
        .map(|m| format!("{}{}", m.text, suffix))
        .collect();
    let groups: Vec<BTreeMap<String, String>> = chosen.iter().map(|m| m.groups.clone()).collect();

    if cli.output == OutputFormat::Json {
        let payload = ResultPayload {
            kind,
            matches: texts,
            groups,
            programs: cli.program.clone(),
            multiple_joiner: cli.multiple_joiner.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    // '-' asks for the text on stdout; '@' (clipboard in the original tool)
    // degrades to the same thing here.
    let external: Vec<&String> = cli
        .program
        .iter()
        .filter(|p| p.as_str() != "-" && p.as_str() != "@")
        .collect();
    for program in &external {
        run_program(program.as_str(), kind, &texts, &groups);
    }
    if external.len() < cli.program.len() || cli.program.is_empty() {
        println!("{}", join_matches(&texts, &cli.multiple_joiner, kind)?);
    }
    Ok(())
}

/// Join chosen texts per the --multiple-joiner policy.
///
/// An integer joiner picks one selection by index (negative counts from the
/// end; anything out of range falls back to the last selection).
pub fn join_matches(texts: &[String], joiner: &str, kind: MatchKind) -> Result<String> {
    if let Ok(requested) = joiner.parse::<isize>() {
        let len = texts.len() as isize;
        let index = if requested < 0 {
            len + requested
        } else {
            requested
        };
        let index = if (0..len).contains(&index) {
            index
        } else {
            len - 1
        };
        return Ok(texts[index as usize].clone());
    }
    Ok(match joiner {
        "json" => serde_json::to_string_pretty(texts)?,
        "newline" => texts.join("\n"),
        "space" => texts.join(" "),
        "auto" => {
            let sep = if matches!(kind, MatchKind::Line | MatchKind::Url) {
                "\n"
            } else {
                " "
            };
            texts.join(sep)
        }
        // "empty" and anything unrecognized concatenate directly.
        _ => texts.concat(),
    })
}

/// Launch one external program for the selection.
///
/// Program failures are reported but never fail the run; the selection
/// itself already succeeded.
fn run_program(
    program: &str,
    kind: MatchKind,
    texts: &[String],
    groups: &[BTreeMap<String, String>],
) {
    let commands = match kind {
        MatchKind::Linenum => linenum_commands(program, texts, groups),
        _ => texts
            .iter()
            .zip(groups)
            .map(|(text, group)| {
                let mut cmd: Vec<String> = program.split_whitespace().map(String::from).collect();
                if group.is_empty() {
                    cmd.push(text.clone());
                } else {
                    // Named groups are forwarded as key=value arguments.
                    cmd.extend(group.iter().map(|(k, v)| format!("{k}={v}")));
                }
                cmd
            })
            .collect(),
    };

    for cmd in commands {
        let Some((bin, args)) = cmd.split_first() else {
            continue;
        };
        if let Err(e) = Command::new(bin).args(args).spawn() {
            warn!(program = %bin, error = %e, "failed to launch program");
        }
    }
}

/// Build the command for a linenum selection, substituting the {path} and
/// {line} placeholders from the first non-empty match.
fn linenum_commands(
    program: &str,
    texts: &[String],
    groups: &[BTreeMap<String, String>],
) -> Vec<Vec<String>> {
    let located = texts.iter().zip(groups).find_map(|(text, group)| {
        if text.is_empty() {
            return None;
        }
        let path = group.get("path")?;
        let line = group.get("line")?;
        // Drop any leading "context:" the pattern may have swallowed.
        let path = path.rsplit(':').next().unwrap_or(path);
        Some((path.to_string(), line.clone()))
    });
    let Some((path, line)) = located else {
        return Vec::new();
    };
    vec![program
        .split_whitespace()
        .map(|part| part.replace("{path}", &path).replace("{line}", &line))
        .collect()]
}
