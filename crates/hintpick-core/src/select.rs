//! The interactive selection state machine.
//!
//! One [`Selector`] exists per run. The surrounding I/O loop blocks on the
//! terminal, translates each keystroke into an [`Event`], and feeds it to
//! [`Selector::handle`]; the returned [`Outcome`] tells the loop whether to
//! keep going. Every transition runs synchronously to completion, so there is
//! no state to abort mid-flight.
//!
//! Typed-label mistakes never escape this module: a label that decodes to an
//! unknown or already-resolved index just clears the input buffer.

use std::collections::HashSet;

use tracing::debug;

use crate::hints::{decode_hint, Alphabet, LabelMap};
use crate::matcher::Match;
use crate::render;

/// One terminal event, as delivered by the surrounding I/O loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Resize,
    Interrupt,
    Eof,
}

/// What the loop should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading events.
    Continue,
    /// Selection finished; exit successfully with the chosen matches.
    Done,
    /// The user gave up; exit non-zero with no result.
    Cancelled,
}

/// Rewrite extractor scan indices into the numbering the user will see.
///
/// Descending numbering (the default) gives the lowest number to the last
/// match on screen, which is usually the one nearest the prompt. Offsets
/// below zero clamp to zero.
pub fn assign_indices(mut matches: Vec<Match>, ascending: bool, offset: isize) -> Vec<Match> {
    let offset = offset.max(0) as usize;
    let max_index = matches.last().map(|m| m.index).unwrap_or(0);
    for m in &mut matches {
        m.index = if ascending {
            m.index + offset
        } else {
            max_index - m.index + offset
        };
    }
    matches
}

/// Live selection state: the typed prefix, resolved matches, and the
/// memoized overlay for the current state.
#[derive(Debug)]
pub struct Selector {
    text: String,
    matches: Vec<Match>,
    labels: LabelMap,
    alphabet: Alphabet,
    multiple: bool,
    current_input: String,
    chosen: Vec<Match>,
    ignored: HashSet<usize>,
    rendered: Option<String>,
}

impl Selector {
    /// Build the selection state for one run.
    ///
    /// `matches` must already carry their final hint indices
    /// (see [`assign_indices`]).
    pub fn new(text: String, matches: Vec<Match>, alphabet: Alphabet, multiple: bool) -> Self {
        let labels = LabelMap::new(matches.iter().map(|m| m.index), &alphabet);
        Self {
            text,
            matches,
            labels,
            alphabet,
            multiple,
            current_input: String::new(),
            chosen: Vec::new(),
            ignored: HashSet::new(),
            rendered: None,
        }
    }

    /// Matches resolved so far, in selection order.
    pub fn chosen(&self) -> &[Match] {
        &self.chosen
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Run one transition.
    pub fn handle(&mut self, event: Event) -> Outcome {
        match event {
            Event::Char(c) => self.on_char(c),
            Event::Backspace => {
                if self.current_input.pop().is_some() {
                    self.invalidate();
                }
                Outcome::Continue
            }
            Event::Enter => self.on_enter(),
            Event::Escape => {
                // In multi-select, Escape finishes and keeps what was chosen.
                if self.multiple {
                    Outcome::Done
                } else {
                    Outcome::Cancelled
                }
            }
            Event::Resize => {
                // Layout is recomputed at render time; just drop the cache.
                self.invalidate();
                Outcome::Continue
            }
            Event::Interrupt | Event::Eof => Outcome::Cancelled,
        }
    }

    fn on_char(&mut self, c: char) -> Outcome {
        if !self.alphabet.contains(c) {
            return Outcome::Continue;
        }
        self.current_input.push(c);
        self.invalidate();

        let live = self.live_positions();
        debug!(input = %self.current_input, live = live.len(), "narrowed candidates");
        if live.len() == 1 {
            return self.resolve(live[0]);
        }
        Outcome::Continue
    }

    fn on_enter(&mut self) -> Outcome {
        if self.current_input.is_empty() {
            return Outcome::Continue;
        }
        match decode_hint(&self.current_input, &self.alphabet) {
            Ok(index) if !self.ignored.contains(&index) => {
                if let Some(pos) = self.matches.iter().position(|m| m.index == index) {
                    return self.resolve(pos);
                }
                self.reject_input();
            }
            _ => self.reject_input(),
        }
        Outcome::Continue
    }

    /// Positions (into `matches`) still selectable under the current input.
    fn live_positions(&self) -> Vec<usize> {
        self.matches
            .iter()
            .enumerate()
            .filter(|(_, m)| !self.ignored.contains(&m.index))
            .filter(|(_, m)| {
                self.labels
                    .get(m.index)
                    .is_some_and(|label| label.starts_with(&self.current_input))
            })
            .map(|(pos, _)| pos)
            .collect()
    }

    fn resolve(&mut self, pos: usize) -> Outcome {
        let m = self.matches[pos].clone();
        debug!(index = m.index, text = %m.text, "resolved match");
        self.ignored.insert(m.index);
        self.chosen.push(m);
        self.current_input.clear();
        self.invalidate();
        if self.multiple {
            Outcome::Continue
        } else {
            Outcome::Done
        }
    }

    fn reject_input(&mut self) {
        debug!(input = %self.current_input, "no such selection");
        self.current_input.clear();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.rendered = None;
    }

    /// The overlay for the current state, memoized until input or the
    /// resolved set changes.
    pub fn rendered(&mut self) -> &str {
        if self.rendered.is_none() {
            self.rendered = Some(render::render(
                &self.text,
                &self.current_input,
                &self.matches,
                &self.ignored,
                &self.labels,
            ));
        }
        self.rendered.as_deref().unwrap_or_default()
    }
}
