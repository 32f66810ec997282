//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use rprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// Unsupported model, missing credentials, or out-of-range options.
    Configuration,
    /// The operation is not allowed in the session's current state.
    State,
    /// The provider answered with an empty, malformed, or truncated reply.
    ProviderResponse,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Configuration, message)
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::State, message)
    }

    pub fn provider_response(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::ProviderResponse, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Transport, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        match value.kind {
            ProviderErrorKind::InvalidResponse => ChatError::provider_response(value.message),
            _ => ChatError::transport(value.to_string()),
        }
    }
}
