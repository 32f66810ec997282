//! Common `rprovider` imports for downstream crates.

pub use crate::{
    ChatMessage, ChatOptions, ChatProvider, CredentialStore, GenerationSpan, ModelId,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, ProviderReply,
    ResolvedChatOptions, Role, SecretString,
};
pub use rcommon::{BoxFuture, SeedSource};
