//! Hint label encoding and decoding.
//!
//! Labels are positional numerals over a configurable alphabet: index 0 is
//! the alphabet's first symbol, and larger indices grow extra digits with the
//! most significant symbol first. With the default 36-symbol alphabet the
//! first 36 matches get single-character labels.

use std::collections::HashMap;

use crate::error::HintError;

/// Digits followed by lowercase letters, base 36.
pub const DEFAULT_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Ordered symbol set defining the numeral base for hint labels.
///
/// Symbols must be distinct and there must be at least two of them.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new(symbols: &str) -> Result<Self, HintError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < 2 {
            return Err(HintError::InvalidAlphabet(
                "at least 2 symbols are required".to_string(),
            ));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(HintError::InvalidAlphabet(format!(
                    "symbol {c:?} appears more than once"
                )));
            }
        }
        Ok(Self { symbols })
    }

    /// The numeral base (number of symbols).
    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    /// Whether `c` is one of the alphabet's symbols.
    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    fn digit(&self, c: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == c)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        // The literal above is known-valid, so skip re-validation.
        Self {
            symbols: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

/// Encode a hint index as a label, most significant symbol first.
///
/// Index 0 encodes as the alphabet's first symbol, never the empty string.
pub fn encode_hint(index: usize, alphabet: &Alphabet) -> String {
    let base = alphabet.base();
    let mut digits = Vec::new();
    let mut num = index;
    while digits.is_empty() || num > 0 {
        digits.push(alphabet.symbols[num % base]);
        num /= base;
    }
    digits.iter().rev().collect()
}

/// Decode a typed label back to its hint index (Horner's rule).
///
/// Fails if any character is absent from the alphabet, or if the label is so
/// long the index overflows. Input length is unbounded (the user can mash
/// keys before pressing Enter), so overflow must surface as a recoverable
/// error, never a panic or a silent wrap onto a live index. An empty label
/// decodes to 0; callers gate on non-empty input before decoding.
pub fn decode_hint(label: &str, alphabet: &Alphabet) -> Result<usize, HintError> {
    let mut index = 0usize;
    for c in label.chars() {
        let digit = alphabet.digit(c).ok_or_else(|| HintError::InvalidLabel {
            label: label.to_string(),
            reason: format!("{c:?} is not in the alphabet"),
        })?;
        index = index
            .checked_mul(alphabet.base())
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| HintError::InvalidLabel {
                label: label.to_string(),
                reason: "label is too long to be a hint index".to_string(),
            })?;
    }
    Ok(index)
}

/// Labels for every live hint index, computed once per run.
///
/// The same (index, alphabet) pair is queried on every redraw, so labels are
/// materialized up front. This bounds the cache to the number of matches
/// instead of growing without limit across runs.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    labels: HashMap<usize, String>,
}

impl LabelMap {
    pub fn new(indices: impl IntoIterator<Item = usize>, alphabet: &Alphabet) -> Self {
        let labels = indices
            .into_iter()
            .map(|i| (i, encode_hint(i, alphabet)))
            .collect();
        Self { labels }
    }

    /// Label for a hint index, if the index is part of this run.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_as_first_symbol() {
        let alphabet = Alphabet::default();
        assert_eq!(encode_hint(0, &alphabet), "0");
    }

    #[test]
    fn base_two_positional_numbering() {
        // "ab": 0 -> a, 1 -> b, 2 -> ba
        let alphabet = Alphabet::new("ab").unwrap();
        assert_eq!(encode_hint(0, &alphabet), "a");
        assert_eq!(encode_hint(1, &alphabet), "b");
        assert_eq!(encode_hint(2, &alphabet), "ba");
    }

    #[test]
    fn default_alphabet_rolls_over_at_base() {
        let alphabet = Alphabet::default();
        assert_eq!(encode_hint(35, &alphabet), "z");
        assert_eq!(encode_hint(36, &alphabet), "10");
    }

    #[test]
    fn round_trip_for_various_bases() {
        for symbols in ["ab", "01234", DEFAULT_ALPHABET] {
            let alphabet = Alphabet::new(symbols).unwrap();
            for index in [0usize, 1, 2, 7, 35, 36, 100, 12345] {
                let label = encode_hint(index, &alphabet);
                assert!(!label.is_empty());
                assert_eq!(decode_hint(&label, &alphabet).unwrap(), index);
            }
        }
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        let alphabet = Alphabet::new("ab").unwrap();
        let err = decode_hint("aXb", &alphabet).unwrap_err();
        assert!(err.to_string().contains("not in the alphabet"));
    }

    #[test]
    fn alphabet_requires_two_distinct_symbols() {
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("a").is_err());
        assert!(Alphabet::new("aa").is_err());
        assert!(Alphabet::new("ab").is_ok());
    }

    #[test]
    fn decode_rejects_labels_that_overflow_the_index() {
        let alphabet = Alphabet::default();
        let label = "z".repeat(40);
        let err = decode_hint(&label, &alphabet).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn label_map_covers_exactly_the_given_indices() {
        let alphabet = Alphabet::default();
        let map = LabelMap::new([1usize, 2, 3], &alphabet);
        assert_eq!(map.get(1), Some("1"));
        assert_eq!(map.get(3), Some("3"));
        assert_eq!(map.get(0), None);
        assert_eq!(map.get(4), None);
    }
}
