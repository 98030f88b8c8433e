//! Span refiners: narrowing a raw regex span to the text a user wants.
//!
//! Refiners are pure functions over `(text, start, end)` composed in a fixed
//! order per match kind. Each one is a no-op when its precondition does not
//! hold, and none may produce `start > end`; a refiner that cannot improve a
//! span leaves it unchanged rather than corrupting downstream rendering.

/// A span postprocessor. Offsets are byte positions into the padded text.
pub type Refiner = fn(&str, usize, usize) -> (usize, usize);

const DELIMITER_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('<', '>'),
    ('*', '*'),
    ('"', '"'),
    ('\'', '\''),
];

fn closing_for(open: char) -> Option<char> {
    DELIMITER_PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, close)| *close)
}

fn char_before(text: &str, pos: usize) -> Option<char> {
    text.get(..pos).and_then(|prefix| prefix.chars().next_back())
}

/// Clean up a URL span.
///
/// Handles the common ways URLs are decorated in terminal output:
/// asciidoc `link:url[title]` markup, trailing sentence punctuation,
/// a surrounding delimiter pair, and the reST `` `_ `` closer.
pub fn url(text: &str, start: usize, end: usize) -> (usize, usize) {
    let mut end = end;

    // asciidoc puts the display text in brackets right after the URL.
    if start >= 5 && text.get(start - 5..start) == Some("link:") {
        if let Some(idx) = text.get(start..end).and_then(|span| span.rfind('[')) {
            end = start + idx;
        }
    }

    // Trailing sentence punctuation.
    while end > start {
        match char_before(text, end) {
            Some(c) if ".,?!".contains(c) => end -= c.len_utf8(),
            _ => break,
        }
    }

    // A URL opened by a bracket or quote ends at the matching closer.
    if let Some(open) = char_before(text, start) {
        if let Some(close) = closing_for(open) {
            if let Some(idx) = text.get(start..).and_then(|rest| rest.find(close)) {
                if idx > 0 {
                    end = start + idx;
                }
            }
        }
    }

    // reST hyperlink closer: `http://example.com`_
    if end >= start + 2 && text.get(..end).is_some_and(|prefix| prefix.ends_with("`_")) {
        end -= 2;
    }

    (start, end)
}

/// Strip one pair of enclosing brackets when the span is exactly wrapped.
pub fn brackets(text: &str, start: usize, end: usize) -> (usize, usize) {
    shrink_wrapped(text, start, end, |first, last| {
        "({[<".contains(first) && closing_for(first) == Some(last)
    })
}

/// Strip one pair of enclosing quotes when the span is exactly wrapped.
pub fn quotes(text: &str, start: usize, end: usize) -> (usize, usize) {
    shrink_wrapped(text, start, end, |first, last| {
        "'\"".contains(first) && first == last
    })
}

fn shrink_wrapped(
    text: &str,
    mut start: usize,
    mut end: usize,
    is_pair: impl Fn(char, char) -> bool,
) -> (usize, usize) {
    if start < end && end <= text.len() {
        let Some(span) = text.get(start..end) else {
            return (start, end);
        };
        let (Some(first), Some(last)) = (span.chars().next(), span.chars().next_back()) else {
            return (start, end);
        };
        // A one-character span has first == last; require room for both.
        if span.chars().count() >= 2 && is_pair(first, last) {
            start += first.len_utf8();
            end -= last.len_utf8();
        }
    }
    (start, end)
}
