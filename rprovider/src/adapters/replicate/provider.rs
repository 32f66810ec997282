//! Replicate provider: the conversation is flattened into one instruction prompt.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    ChatMessage, ChatProvider, ProviderError, ProviderFuture, ProviderId, ProviderReply,
    ResolvedChatOptions, Role, SecretString,
};

use super::transport::ReplicateTransport;
use super::types::{ReplicateInput, ReplicateRequest};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_POLLS: u32 = 240;

#[derive(Debug, Clone)]
pub struct ReplicateProvider {
    api_token: SecretString,
    transport: Arc<dyn ReplicateTransport>,
    poll_interval: Duration,
    max_polls: u32,
}

impl ReplicateProvider {
    pub fn new(api_token: SecretString, transport: Arc<dyn ReplicateTransport>) -> Self {
        Self {
            api_token,
            transport,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub(crate) fn build_replicate_request(
        &self,
        history: &[ChatMessage],
        options: &ResolvedChatOptions,
    ) -> ReplicateRequest {
        ReplicateRequest {
            model: options.model.wire_name().to_string(),
            input: ReplicateInput {
                prompt: build_prompt(history),
                system_prompt: latest_context(history).unwrap_or_default().to_string(),
                debug: options.debug,
                top_k: options.top_tokens,
                top_p: options.top_probability,
                temperature: options.temperature,
                max_new_tokens: options.max_tokens_limit(),
                min_new_tokens: options.min_tokens,
                seed: options.seed,
                stop_sequences: wrap_stop_sequences(&options.stop_sequences),
            },
        }
    }
}

/// User turns are wrapped in instruction tags; model turns are left bare.
pub(crate) fn build_prompt(history: &[ChatMessage]) -> String {
    history
        .iter()
        .filter_map(|message| match message.role() {
            Role::User => Some(format!("[INST] {} [/INST]", message.text())),
            Role::Model => Some(message.text().to_string()),
            Role::System => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn latest_context(history: &[ChatMessage]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|message| message.role() == Role::System)
        .map(ChatMessage::text)
}

pub(crate) fn wrap_stop_sequences(stop_sequences: &[String]) -> String {
    stop_sequences
        .iter()
        .map(|sequence| format!("<{sequence}>"))
        .collect::<Vec<_>>()
        .join(",")
}

impl ChatProvider for ReplicateProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Replicate
    }

    fn send_history<'a>(
        &'a self,
        history: &'a [ChatMessage],
        options: &'a ResolvedChatOptions,
    ) -> ProviderFuture<'a, Result<ProviderReply, ProviderError>> {
        Box::pin(async move {
            if !self.supports(options.model) {
                return Err(ProviderError::invalid_request(format!(
                    "model '{}' is not served by Replicate",
                    options.model
                )));
            }

            let request = self.build_replicate_request(history, options);
            let mut prediction = self
                .transport
                .create_prediction(request, &self.api_token)
                .await?;

            let mut polls = 0;
            while prediction.status.is_pending() {
                if polls >= self.max_polls {
                    return Err(ProviderError::timeout(format!(
                        "Replicate prediction {} still {} after {polls} polls",
                        prediction.id, prediction.status
                    )));
                }

                let poll_url = prediction.poll_url.clone().ok_or_else(|| {
                    ProviderError::invalid_response(format!(
                        "Replicate prediction {} is pending without a poll url",
                        prediction.id
                    ))
                })?;

                tokio::time::sleep(self.poll_interval).await;
                prediction = self
                    .transport
                    .get_prediction(&poll_url, &self.api_token)
                    .await?;
                polls += 1;
            }

            tracing::trace!(id = %prediction.id, polls, "Replicate prediction finished");
            prediction.into_reply()
        })
    }
}
