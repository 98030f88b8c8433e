//! Match extraction: pattern scanning and span materialization.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::{strip_filler, FILLER};
use crate::refine::Refiner;

/// One candidate span extracted from the normalized screen text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Hint index. Unique per run; extraction assigns scan order 0..k-1 and
    /// [`crate::select::assign_indices`] rewrites it once before the loop.
    pub index: usize,
    /// Half-open byte offsets into the normalized text.
    pub start: usize,
    pub end: usize,
    /// Span content with newlines and filler removed. This is the value the
    /// caller ultimately receives.
    pub text: String,
    /// Captured named groups, for downstream action dispatch. Empty when the
    /// pattern has no named groups.
    pub groups: BTreeMap<String, String>,
}

/// Scan `text` with `pattern` and yield refined matches in document order.
///
/// Span selection: patterns with named groups (and patterns with no groups
/// at all) use the whole match; otherwise the last numbered group becomes
/// the span, which lets a pattern anchor on context it does not select.
pub fn extract(
    pattern: &Regex,
    refiners: &[Refiner],
    text: &str,
    minimum_match_length: usize,
) -> Vec<Match> {
    let has_named_groups = pattern.capture_names().flatten().next().is_some();
    let group = if has_named_groups {
        0
    } else {
        pattern.captures_len() - 1
    };

    let mut matches = Vec::new();
    for caps in pattern.captures_iter(text) {
        let Some(m) = caps.get(group) else { continue };
        let (mut start, mut end) = (m.start(), m.end());

        // Drop padding the pattern swallowed at a line end. The floor is an
        // empty span; anything that short is discarded by the length filter.
        while end > start && text[..end].ends_with(FILLER) {
            end -= 1;
        }
        if text[start..end].chars().count() < minimum_match_length {
            continue;
        }

        for refine in refiners {
            (start, end) = refine(text, start, end);
        }

        let mut groups = BTreeMap::new();
        if has_named_groups {
            for name in pattern.capture_names().flatten() {
                let value = caps
                    .name(name)
                    .map(|g| g.as_str().to_string())
                    .unwrap_or_default();
                groups.insert(name.to_string(), value);
            }
        }

        let content = strip_filler(&text[start..end]).replace('\n', "");
        matches.push(Match {
            index: matches.len(),
            start,
            end,
            text: content,
            groups,
        });
    }

    debug!(count = matches.len(), "extracted matches");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine;

    fn extract_simple(pattern: &str, text: &str, min: usize) -> Vec<Match> {
        extract(&Regex::new(pattern).unwrap(), &[], text, min)
    }

    #[test]
    fn matches_come_in_document_order_with_sequential_indices() {
        let matches = extract_simple(r"\w+", "foo bar baz", 3);
        let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["foo", "bar", "baz"]);
        let indices: Vec<usize> = matches.iter().map(|m| m.index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn spans_are_half_open_and_well_formed() {
        let text = "alpha beta";
        for m in extract_simple(r"\w+", text, 3) {
            assert!(m.start < m.end);
            assert!(m.end <= text.len());
        }
    }

    #[test]
    fn trailing_filler_is_trimmed_from_spans() {
        // A token at the end of a padded line; \S matches the NUL padding.
        let text = "see foo.txt\0\0\0\nnext";
        let matches = extract_simple(r"\S+", text, 3);
        let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["see", "foo.txt", "next"]);
        let m = &matches[1];
        assert_eq!(&text[m.start..m.end], "foo.txt");
    }

    #[test]
    fn short_matches_are_discarded() {
        let matches = extract_simple(r"\w+", "go to the station", 4);
        let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["station"]);
    }

    #[test]
    fn all_filler_match_trims_to_nothing_and_is_dropped() {
        // Pathological pattern that matches pure padding.
        let matches = extract_simple("\x00+", "ab\0\0\0\ncd", 1);
        assert!(matches.is_empty());
    }

    #[test]
    fn numbered_group_narrows_the_span() {
        // Anchor on the prefix, select only the value.
        let matches = extract_simple(r"id=(\w+)", "id=abc123 id=xyz", 3);
        let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["abc123", "xyz"]);
        assert!(matches.iter().all(|m| m.groups.is_empty()));
    }

    #[test]
    fn named_groups_use_the_whole_match_and_carry_captures() {
        let matches = extract_simple(
            r"(?P<path>\S+\.rs):(?P<line>\d+)",
            "err at src/main.rs:42 here",
            3,
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "src/main.rs:42");
        assert_eq!(matches[0].groups["path"], "src/main.rs");
        assert_eq!(matches[0].groups["line"], "42");
    }

    #[test]
    fn refiners_are_applied_after_extraction() {
        let matches = extract(
            &Regex::new(r"\([a-z./]+\)").unwrap(),
            &[refine::brackets],
            "(see) (foo.txt)",
            3,
        );
        let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["see", "foo.txt"]);
    }

    #[test]
    fn match_text_drops_embedded_newlines_and_filler() {
        let matches = extract_simple(r"(?s)one.*two", "one\0\0\ntwo", 3);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "onetwo");
    }
}
