//! OpenAI chat-completion types and reply validation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{ChatMessage, ProviderError, ProviderReply, Role};

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    pub temperature: f32,
    pub stop: Vec<String>,
    pub seed: u32,
    pub top_p: f32,
    pub max_tokens: Option<u32>,
    pub n: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub logit_bias: BTreeMap<u32, f32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiMessage {
    pub role: OpenAiRole,
    pub content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(value: &ChatMessage) -> Self {
        Self {
            role: value.role().into(),
            content: value.text().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiRole {
    System,
    User,
    Assistant,
}

impl OpenAiRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl From<Role> for OpenAiRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => Self::System,
            Role::User => Self::User,
            Role::Model => Self::Assistant,
        }
    }
}

/// First choice of a chat completion, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiResponse {
    pub model: String,
    pub created: Option<i64>,
    pub content: Option<String>,
    pub finish_reason: OpenAiFinishReason,
    pub usage: OpenAiUsage,
}

impl OpenAiResponse {
    /// Accepts only complete answers: content present and generation stopped naturally.
    pub(crate) fn into_reply(self) -> Result<ProviderReply, ProviderError> {
        if self.finish_reason != OpenAiFinishReason::Stop {
            return Err(ProviderError::invalid_response(format!(
                "OpenAI completion did not finish cleanly (finish_reason: {})",
                self.finish_reason.as_str()
            )));
        }

        let content = self.content.ok_or_else(|| {
            ProviderError::invalid_response("OpenAI completion returned no content")
        })?;
        if content.trim().is_empty() {
            return Err(ProviderError::invalid_response(
                "OpenAI completion returned empty content",
            ));
        }

        let created_at = self
            .created
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

        Ok(match created_at {
            Some(created_at) => ProviderReply::new(content).with_created_at(created_at),
            None => ProviderReply::new(content),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenAiFinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Missing,
    Other(String),
}

impl OpenAiFinishReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ContentFilter => "content_filter",
            Self::ToolCalls => "tool_calls",
            Self::Missing => "null",
            Self::Other(value) => value.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
