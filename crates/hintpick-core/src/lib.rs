//! Hint-selection engine for picking text out of captured terminal screens.
//!
//! Raw captured text is normalized into a filler-padded grid, scanned for
//! candidate spans, and every candidate gets a short positional label over a
//! configurable alphabet. An event-driven state machine then narrows the
//! candidates as the user types, re-rendering the overlay until a selection
//! resolves or the run is cancelled.
//!
//! # Modules
//!
//! - [`normalize`]: captured-text expansion and column padding
//! - [`patterns`]: built-in match kinds and their compiled patterns
//! - [`matcher`]: span extraction and match materialization
//! - [`refine`]: span postprocessors (brackets, quotes, URL cleanup)
//! - [`hints`]: label encoding and decoding over an alphabet
//! - [`select`]: keystroke state machine and hint index assignment
//! - [`render`]: overlay composition with reverse-order splicing
//! - [`error`]: engine error types
//!
//! # Pipeline
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | normalize | raw capture + width | rectangular padded text |
//! | extract | padded text + pattern | ordered [`matcher::Match`] list |
//! | assign | extractor indices | user-facing hint numbering |
//! | select | keystroke events | chosen matches + exit status |

pub mod error;
pub mod hints;
pub mod matcher;
pub mod normalize;
pub mod patterns;
pub mod refine;
pub mod render;
pub mod select;
