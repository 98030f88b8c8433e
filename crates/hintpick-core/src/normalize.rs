//! Normalizing raw captured screen text into addressable lines.
//!
//! Captured screen text encodes two things compactly:
//!
//! - a `\r` inside a row marks where the terminal wrapped a long line, so one
//!   logical row may arrive as several `\r`-joined segments;
//! - a row consisting solely of `\r` characters encodes that many consecutive
//!   blank rows as a single token.
//!
//! Normalization rejoins wrapped segments as independent lines and pads every
//! line to the terminal width with [`FILLER`], so later span arithmetic can
//! treat the text as a rectangular grid.

/// Padding marker appended to short lines.
///
/// NUL never occurs in captured screen content, so padding can be stripped
/// unambiguously when match text is materialized for the caller.
pub const FILLER: char = '\0';

/// Expand captured screen text into a filler-padded line grid.
///
/// Every output line is exactly `cols` characters unless its content already
/// fills (or overflows) the width. Lines are joined with `\n`.
pub fn normalize(raw: &str, cols: usize) -> String {
    let blank_line: String = std::iter::repeat(FILLER).take(cols).collect();
    let mut lines = Vec::new();

    for row in raw.split('\n') {
        if row.is_empty() {
            continue;
        }
        if row.chars().all(|c| c == '\r') {
            // Run-length encoded blank rows: one '\r' per blank screen line.
            for _ in 0..row.len() {
                lines.push(blank_line.clone());
            }
            continue;
        }
        for segment in row.split('\r') {
            if !segment.is_empty() {
                lines.push(pad(segment, cols));
            }
        }
    }

    lines.join("\n")
}

/// Right-pad a line to `cols` characters with the filler marker.
fn pad(segment: &str, cols: usize) -> String {
    let len = segment.chars().count();
    let mut line = String::with_capacity(segment.len() + cols.saturating_sub(len));
    line.push_str(segment);
    for _ in len..cols {
        line.push(FILLER);
    }
    line
}

/// Remove filler markers (and nothing else) from a string.
pub fn strip_filler(text: &str) -> String {
    text.chars().filter(|&c| c != FILLER).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_are_padded_to_width() {
        let out = normalize("ab\ncdef", 4);
        assert_eq!(out, "ab\0\0\ncdef");
    }

    #[test]
    fn wrapped_rows_become_independent_lines() {
        // One logical row transmitted as two wrapped segments.
        let out = normalize("abcd\refgh", 4);
        assert_eq!(out, "abcd\nefgh");
    }

    #[test]
    fn blank_run_token_expands() {
        // Three '\r' with no content = three blank rows.
        let out = normalize("ab\n\r\r\r\ncd", 2);
        assert_eq!(out, "ab\n\0\0\n\0\0\n\0\0\ncd");
    }

    #[test]
    fn empty_rows_are_skipped() {
        let out = normalize("ab\n\ncd", 2);
        assert_eq!(out, "ab\ncd");
    }

    #[test]
    fn exact_width_line_gets_no_padding() {
        let out = normalize("abcd", 4);
        assert_eq!(out, "abcd");
    }

    #[test]
    fn padding_counts_characters_not_bytes() {
        // Two multi-byte characters still count as two columns.
        let out = normalize("héllo", 7);
        assert_eq!(out.chars().count(), 7);
        assert!(out.ends_with("\0\0"));
    }

    #[test]
    fn strip_filler_removes_only_padding() {
        assert_eq!(strip_filler("ab\0\0\ncd\0"), "ab\ncd");
    }

    #[test]
    fn empty_input_normalizes_to_empty() {
        assert_eq!(normalize("", 10), "");
    }
}
