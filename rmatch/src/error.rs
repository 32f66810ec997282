//! Matching-layer errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

use rchat::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorKind {
    /// Caller supplied nothing to match against.
    InvalidInput,
    /// A document could not be opened or its text extracted.
    Document,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchError {
    pub kind: MatchErrorKind,
    pub message: String,
}

impl MatchError {
    pub fn new(kind: MatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(MatchErrorKind::InvalidInput, message)
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::new(MatchErrorKind::Document, message)
    }

    pub fn chat(message: impl Into<String>) -> Self {
        Self::new(MatchErrorKind::Chat, message)
    }
}

impl Display for MatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for MatchError {}

impl From<ChatError> for MatchError {
    fn from(value: ChatError) -> Self {
        MatchError::chat(value.to_string())
    }
}
