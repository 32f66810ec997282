//! Unified facade over the rubric workspace crates.
//!
//! This crate is the single dependency for most applications. It re-exports
//! the chat, provider and matching crates and adds environment configuration,
//! logging setup and runtime wiring.
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use rubric::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! init_tracing()?;
//! let config = RubricConfig::from_env()?;
//! let runtime = build_runtime(&config)?;
//!
//! let result = runtime
//!     .matcher
//!     .match_pdfs(
//!         Path::new("job.pdf"),
//!         Some(Path::new("resume.pdf")),
//!         None,
//!     )
//!     .await?;
//! println!("total score: {:.1}, promising: {}", result.total_score, result.promising);
//! # Ok(())
//! # }
//! ```

mod config;
mod logging;

pub mod prelude;
pub mod runtime;

pub use rchat;
pub use rcommon;
pub use rmatch;
pub use robserve;
pub use rprovider;

pub use rchat::{
    ChatError, ChatErrorKind, ChatSession, ChatSessionFactory, ChatSessionFactoryBuilder,
    ChatTurnHooks, DEFAULT_HTTP_TIMEOUT, NoopTurnHooks, TurnInfo,
};
pub use rcommon::{
    BoxFuture, FixedSeedSource, RandomSeedSource, SeedSource, SequentialSeedSource, SessionId,
};
pub use rmatch::{
    CategoryWeights, DocumentReader, MatchError, MatchErrorKind, MatchResult, PdfDocumentReader,
    PromisingVerdict, RequirementCategory, RequirementExtractor, RequirementMatcher,
    RequirementScore, Requirements, extract_json_objects, first_json_object,
};
pub use robserve::{MetricsTurnHooks, SafeTurnHooks, TracingTurnHooks};
pub use rprovider::{
    ChatMessage, ChatOptions, ChatProvider, CredentialStore, GenerationSpan, ModelId,
    ProviderError, ProviderErrorKind, ProviderId, ResolvedChatOptions, Role, SecretString,
};

pub use config::{
    HTTP_TIMEOUT_VAR, MODEL_VAR, OPENAI_API_KEY_VAR, REPLICATE_API_TOKEN_VAR, RubricConfig,
};
pub use logging::{DEFAULT_LOG_FILTER, LOG_FILTER_VAR, init_tracing};
pub use runtime::{
    RuntimeBundle, build_runtime, build_runtime_with, session_factory, session_factory_with_hooks,
};
