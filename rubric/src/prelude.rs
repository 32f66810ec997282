//! Common imports for most rubric applications.

pub use crate::{
    RubricConfig, RuntimeBundle, build_runtime, build_runtime_with, init_tracing,
    session_factory, session_factory_with_hooks,
};
pub use crate::{
    CategoryWeights, ChatError, ChatErrorKind, ChatMessage, ChatOptions, ChatSession,
    ChatSessionFactory, CredentialStore, MatchError, MatchErrorKind, MatchResult, ModelId,
    RequirementCategory, RequirementExtractor, RequirementMatcher, RequirementScore,
    Requirements, Role,
};
