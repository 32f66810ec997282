//! Provider-agnostic chat model types and provider adapters.
//!
//! ```rust
//! use chrono::Utc;
//! use rcommon::FixedSeedSource;
//! use rprovider::{ChatMessage, ChatOptions, ModelId, ProviderId};
//!
//! let model = ModelId::parse("llama-2-70b-chat").expect("model should parse");
//! let options = ChatOptions::new("llama-2-70b-chat")
//!     .with_stop_sequences(["END"])
//!     .materialize(model, &FixedSeedSource::new(1));
//! let history = vec![ChatMessage::user("Hello", Utc::now())];
//!
//! assert_eq!(model.provider(), ProviderId::Replicate);
//! assert_eq!(options.stop_sequences, vec!["END".to_string()]);
//! assert_eq!(history[0].text(), "Hello");
//! ```

pub mod adapters;
pub mod credentials;
pub mod error;
pub mod model;
pub mod options;
pub mod prelude;
pub mod provider;

pub use credentials::{CredentialStore, SecretString};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{ChatMessage, GenerationSpan, ModelId, ProviderId, ProviderReply, Role};
pub use options::{
    ChatOptions, DEFAULT_CHOICES, DEFAULT_MIN_TOKENS, DEFAULT_SYSTEM_CONTEXT, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_PROBABILITY, DEFAULT_TOP_TOKENS, ResolvedChatOptions, UNBOUNDED_MAX_TOKENS,
};
pub use provider::{ChatProvider, ProviderFuture};
