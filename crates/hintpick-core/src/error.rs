//! Engine error types.
//!
//! Only startup-time problems (bad alphabet, bad pattern, bad width) surface
//! as errors. Everything the user can trigger while the interactive loop is
//! running is absorbed by the state machine and never propagates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HintError {
    /// The hint alphabet is unusable (too short or repeated symbols).
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// A typed label contains a character outside the alphabet.
    #[error("invalid label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: String },

    /// The match pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The terminal width is unusable for column padding.
    #[error("invalid terminal width: {0}")]
    InvalidWidth(String),
}
