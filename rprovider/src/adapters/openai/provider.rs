//! OpenAI provider: one structured turn per message.

use std::sync::Arc;

use crate::{
    ChatMessage, ChatProvider, ProviderError, ProviderFuture, ProviderId, ProviderReply,
    ResolvedChatOptions, SecretString,
};

use super::transport::OpenAiTransport;
use super::types::{OpenAiMessage, OpenAiRequest};

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    api_key: SecretString,
    transport: Arc<dyn OpenAiTransport>,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, transport: Arc<dyn OpenAiTransport>) -> Self {
        Self { api_key, transport }
    }

    pub(crate) fn build_openai_request(
        &self,
        history: &[ChatMessage],
        options: &ResolvedChatOptions,
    ) -> OpenAiRequest {
        OpenAiRequest {
            model: options.model.wire_name().to_string(),
            messages: history.iter().map(OpenAiMessage::from).collect(),
            temperature: options.temperature,
            stop: options.stop_sequences.clone(),
            seed: options.seed,
            top_p: options.top_probability,
            max_tokens: options.max_tokens_limit(),
            n: options.choices,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            logit_bias: options.logit_bias.clone(),
        }
    }
}

impl ChatProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn send_history<'a>(
        &'a self,
        history: &'a [ChatMessage],
        options: &'a ResolvedChatOptions,
    ) -> ProviderFuture<'a, Result<ProviderReply, ProviderError>> {
        Box::pin(async move {
            if !self.supports(options.model) {
                return Err(ProviderError::invalid_request(format!(
                    "model '{}' is not served by OpenAI",
                    options.model
                )));
            }

            let request = self.build_openai_request(history, options);
            let response = self.transport.complete(request, &self.api_key).await?;
            tracing::trace!(
                model = %response.model,
                total_tokens = response.usage.total_tokens,
                "OpenAI completion received"
            );

            response.into_reply()
        })
    }
}
