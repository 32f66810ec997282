//! Runtime wiring helpers for extraction and matching.

use std::sync::Arc;

use rchat::{ChatError, ChatSessionFactory, ChatTurnHooks};
use rmatch::{RequirementExtractor, RequirementMatcher};
use robserve::{SafeTurnHooks, TracingTurnHooks};

use crate::RubricConfig;

#[derive(Debug, Clone)]
pub struct RuntimeBundle {
    pub factory: Arc<ChatSessionFactory>,
    pub extractor: RequirementExtractor,
    pub matcher: RequirementMatcher,
}

/// Session factory over the default HTTP transports, logging every turn.
pub fn session_factory(config: &RubricConfig) -> Result<Arc<ChatSessionFactory>, ChatError> {
    session_factory_with_hooks(config, Arc::new(SafeTurnHooks::new(TracingTurnHooks)))
}

pub fn session_factory_with_hooks(
    config: &RubricConfig,
    hooks: Arc<dyn ChatTurnHooks>,
) -> Result<Arc<ChatSessionFactory>, ChatError> {
    let factory = ChatSessionFactory::builder(config.credentials.clone())
        .with_timeout(config.http_timeout)
        .with_hooks(hooks)
        .build()?;
    Ok(Arc::new(factory))
}

pub fn build_runtime(config: &RubricConfig) -> Result<RuntimeBundle, ChatError> {
    Ok(build_runtime_with(config, session_factory(config)?))
}

/// Extractor and matcher sharing `factory` and the configured model.
pub fn build_runtime_with(config: &RubricConfig, factory: Arc<ChatSessionFactory>) -> RuntimeBundle {
    let options = config.chat_options();

    RuntimeBundle {
        extractor: RequirementExtractor::new(Arc::clone(&factory), options.clone()),
        matcher: RequirementMatcher::new(Arc::clone(&factory), options),
        factory,
    }
}
