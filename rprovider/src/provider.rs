use std::future::Future;
use std::pin::Pin;

use crate::{ChatMessage, ModelId, ProviderError, ProviderId, ProviderReply, ResolvedChatOptions};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Translates a conversation into one provider request and validates the reply.
pub trait ChatProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn supports(&self, model: ModelId) -> bool {
        model.provider() == self.id()
    }

    fn send_history<'a>(
        &'a self,
        history: &'a [ChatMessage],
        options: &'a ResolvedChatOptions,
    ) -> ProviderFuture<'a, Result<ProviderReply, ProviderError>>;
}
