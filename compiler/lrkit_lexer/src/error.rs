//! Lexing errors.

use std::io;

/// Error raised by the tokenizer to its immediate caller.
///
/// An unrecognized sequence is recoverable: the tokenizer has already
/// discarded the offending input, so calling it again resumes scanning.
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    /// No recognizer confirmed a match for the consumed characters.
    #[error("{}: {text}", .reason.as_deref().unwrap_or("Unrecognized character sequence"))]
    Unrecognized {
        /// Every character consumed by the failed scan.
        text: String,
        /// Explanation from the recognizer that came closest to matching.
        reason: Option<String>,
    },
    /// The underlying character stream failed (including invalid UTF-8).
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LexError {
    /// Characters consumed by an unrecognized scan, if this is one.
    pub fn text(&self) -> Option<&str> {
        match self {
            LexError::Unrecognized { text, .. } => Some(text),
            LexError::Io(_) => None,
        }
    }

    /// The closest recognizer's explanation, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            LexError::Unrecognized { reason, .. } => reason.as_deref(),
            LexError::Io(_) => None,
        }
    }
}
