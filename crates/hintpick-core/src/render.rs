//! Overlay composition: splicing hint labels into the captured text.
//!
//! Matches are spliced in reverse document order. Replacing a span changes
//! the buffer length, so working from the highest offset down keeps every
//! not-yet-processed span's offsets valid. This ordering is a hard invariant
//! of the renderer, not an accident of iteration.

use std::collections::HashSet;

use crate::hints::LabelMap;
use crate::matcher::Match;
use crate::normalize::strip_filler;

/// Dim a match that the current input has ruled out. Still visible, not
/// selectable this round.
fn faint(text: &str) -> String {
    format!("\x1b[2m{text}\x1b[22m")
}

/// High-contrast badge for the untyped remainder of a label.
fn badge(label: &str) -> String {
    format!("\x1b[1;30;42m{label}\x1b[0m")
}

/// Emphasize the matched text that follows the badge.
fn emphasize(text: &str) -> String {
    format!("\x1b[1;97m{text}\x1b[0m")
}

/// Compose the displayable overlay for the current input state.
///
/// The result has filler stripped, logical newlines converted to `\r\n` for
/// a raw-mode terminal, and trailing whitespace trimmed.
pub fn render(
    text: &str,
    current_input: &str,
    matches: &[Match],
    ignored: &HashSet<usize>,
    labels: &LabelMap,
) -> String {
    let mut out = text.to_string();
    for m in matches.iter().rev() {
        if ignored.contains(&m.index) {
            continue;
        }
        let Some(label) = labels.get(m.index) else {
            continue;
        };
        let replacement = overlay_span(&text[m.start..m.end], label, current_input);
        out.replace_range(m.start..m.end, &replacement);
    }

    let out = strip_filler(&out);
    out.replace('\n', "\r\n").trim_end().to_string()
}

/// Replacement text for one match span.
fn overlay_span(span: &str, label: &str, current_input: &str) -> String {
    if !current_input.is_empty() && !label.starts_with(current_input) {
        return faint(span);
    }
    // Show only the untyped label suffix; a fully typed label leaves a
    // single-space badge so the selection stays visible.
    let rest = &label[current_input.len()..];
    let rest = if rest.is_empty() { " " } else { rest };
    // The badge replaces the same number of leading span characters, so the
    // overlay never grows wider than the original match.
    let tail: String = span.chars().skip(rest.chars().count()).collect();
    format!("{}{}", badge(rest), emphasize(&tail))
}
