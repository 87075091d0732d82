//! Typed outcomes of a prompt session.

use std::io;
use thiserror::Error;

/// Why a prompt session ended without an accepted line.
///
/// `Eof` is a session outcome rather than a fault: the user pressed Ctrl-D on
/// an empty line. I/O failures terminate the session immediately and carry
/// the underlying error.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("end of input")]
    Eof,
    #[error("standard output is not a terminal")]
    NotATerminal,
    #[error("terminal does not support line editing")]
    UnsupportedTerminal,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PromptError {
    /// True when the session ended because the user signalled end-of-input.
    pub fn is_eof(&self) -> bool {
        matches!(self, PromptError::Eof)
    }
}
