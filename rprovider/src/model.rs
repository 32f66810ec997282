//! Provider-agnostic conversation message model and model selectors.
//!
//! ```rust
//! use chrono::Utc;
//! use rprovider::{ChatMessage, ModelId, ProviderId, Role};
//!
//! let now = Utc::now();
//! let message = ChatMessage::user("  Summarize this resume  ", now);
//! assert_eq!(message.text(), "Summarize this resume");
//! assert_eq!(message.role(), Role::User);
//! assert_eq!(message.generation_span().start(), message.generation_span().end());
//!
//! let model = ModelId::parse("gpt-4-turbo").expect("alias should parse");
//! assert_eq!(model.provider(), ProviderId::OpenAi);
//! assert!(ModelId::parse("gpt-2").is_none());
//! ```

use std::fmt::{Display, Formatter};

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAi,
    Replicate,
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::OpenAi => "openai",
            Self::Replicate => "replicate",
        };

        f.write_str(id)
    }
}

/// The supported models. Each one is served by exactly one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelId {
    Gpt4Turbo,
    Llama2Chat70b,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Gpt4Turbo, ModelId::Llama2Chat70b];

    pub fn provider(self) -> ProviderId {
        match self {
            Self::Gpt4Turbo => ProviderId::OpenAi,
            Self::Llama2Chat70b => ProviderId::Replicate,
        }
    }

    /// Identifier sent to the provider.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Gpt4Turbo => "gpt-4-1106-preview",
            Self::Llama2Chat70b => "meta/llama-2-70b-chat",
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Llama2Chat70b => "llama-2-70b-chat",
        }
    }

    /// Accepts either the wire name or the short alias, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|model| model.wire_name() == value || model.alias() == value)
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Model,
    System,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Self::User => "user",
            Self::Model => "model",
            Self::System => "system",
        };

        f.write_str(role)
    }
}

/// Wall-clock interval over which a message was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl GenerationSpan {
    /// `end` earlier than `start` collapses to an instant at `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }
}

/// One immutable conversation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    text: String,
    role: Role,
    created_at: DateTime<Utc>,
    generation_span: GenerationSpan,
}

impl ChatMessage {
    pub fn user(text: impl AsRef<str>, at: DateTime<Utc>) -> Self {
        Self::instantaneous(Role::User, text, at)
    }

    pub fn system(text: impl AsRef<str>, at: DateTime<Utc>) -> Self {
        Self::instantaneous(Role::System, text, at)
    }

    pub fn model(
        text: impl AsRef<str>,
        created_at: DateTime<Utc>,
        generation_span: GenerationSpan,
    ) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            role: Role::Model,
            created_at,
            generation_span,
        }
    }

    fn instantaneous(role: Role, text: impl AsRef<str>, at: DateTime<Utc>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            role,
            created_at: at,
            generation_span: GenerationSpan::instant(at),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn generation_span(&self) -> GenerationSpan {
        self.generation_span
    }
}

/// Validated text returned by one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub text: String,
    /// Generation time reported by the provider, when it reports one.
    pub created_at: Option<DateTime<Utc>>,
}

impl ProviderReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}
