//! Builds chat sessions from caller options and explicit credentials.
//!
//! ```rust
//! use rchat::{ChatErrorKind, ChatSessionFactory};
//! use rprovider::{ChatOptions, CredentialStore};
//!
//! let mut credentials = CredentialStore::new();
//! credentials.set_openai_api_key("sk-test").expect("key should be accepted");
//! let factory = ChatSessionFactory::builder(credentials)
//!     .build()
//!     .expect("factory should build");
//!
//! let error = factory
//!     .create(&ChatOptions::new("gpt-2"))
//!     .expect_err("unknown model should be rejected");
//! assert_eq!(error.kind, ChatErrorKind::Configuration);
//! ```

use std::sync::Arc;
use std::time::Duration;

use rcommon::{RandomSeedSource, SeedSource};
use reqwest::Client;
use rprovider::adapters::openai::{OpenAiHttpTransport, OpenAiProvider, OpenAiTransport};
use rprovider::adapters::replicate::{
    DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL, ReplicateHttpTransport, ReplicateProvider,
    ReplicateTransport,
};
use rprovider::{ChatOptions, ChatProvider, CredentialStore, ModelId, ProviderId};

use crate::{ChatError, ChatSession, ChatTurnHooks, NoopTurnHooks};

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(90);

pub struct ChatSessionFactory {
    credentials: CredentialStore,
    seeds: Arc<dyn SeedSource>,
    hooks: Arc<dyn ChatTurnHooks>,
    openai_transport: Arc<dyn OpenAiTransport>,
    replicate_transport: Arc<dyn ReplicateTransport>,
    poll_interval: Duration,
    max_polls: u32,
}

impl ChatSessionFactory {
    pub fn builder(credentials: CredentialStore) -> ChatSessionFactoryBuilder {
        ChatSessionFactoryBuilder::new(credentials)
    }

    /// Validates the options, then returns a session whose context is the
    /// configured system context. Nothing is recorded when validation fails.
    pub fn create(&self, options: &ChatOptions) -> Result<ChatSession, ChatError> {
        let model = ModelId::parse(&options.model).ok_or_else(|| {
            ChatError::configuration(format!("unsupported model '{}'", options.model))
        })?;
        let provider_id = model.provider();

        let api_key = self
            .credentials
            .api_key(provider_id)
            .filter(|key| !key.is_empty())
            .cloned()
            .ok_or_else(|| {
                ChatError::configuration(format!("missing api key for provider '{provider_id}'"))
            })?;

        let resolved = options.materialize(model, self.seeds.as_ref());
        resolved
            .validate()
            .map_err(|err| ChatError::configuration(err.message))?;

        let provider: Arc<dyn ChatProvider> = match provider_id {
            ProviderId::OpenAi => Arc::new(OpenAiProvider::new(
                api_key,
                self.openai_transport.clone(),
            )),
            ProviderId::Replicate => Arc::new(
                ReplicateProvider::new(api_key, self.replicate_transport.clone())
                    .with_poll_interval(self.poll_interval)
                    .with_max_polls(self.max_polls),
            ),
        };

        if !provider.supports(model) {
            return Err(ChatError::configuration(format!(
                "provider '{}' does not support model '{model}'",
                provider.id()
            )));
        }

        let system_context = resolved.system_context.clone();
        let mut session =
            ChatSession::new(provider, Arc::new(resolved)).with_hooks(self.hooks.clone());
        session.set_context(system_context)?;

        tracing::debug!(
            session_id = %session.id(),
            provider = %provider_id,
            model = %model,
            "chat session created"
        );
        Ok(session)
    }
}

impl std::fmt::Debug for ChatSessionFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSessionFactory")
            .field("credentials", &self.credentials)
            .field("openai_transport", &self.openai_transport)
            .field("replicate_transport", &self.replicate_transport)
            .field("poll_interval", &self.poll_interval)
            .field("max_polls", &self.max_polls)
            .finish()
    }
}

pub struct ChatSessionFactoryBuilder {
    credentials: CredentialStore,
    timeout: Duration,
    seeds: Arc<dyn SeedSource>,
    hooks: Arc<dyn ChatTurnHooks>,
    openai_transport: Option<Arc<dyn OpenAiTransport>>,
    replicate_transport: Option<Arc<dyn ReplicateTransport>>,
    poll_interval: Duration,
    max_polls: u32,
}

impl ChatSessionFactoryBuilder {
    pub fn new(credentials: CredentialStore) -> Self {
        Self {
            credentials,
            timeout: DEFAULT_HTTP_TIMEOUT,
            seeds: Arc::new(RandomSeedSource),
            hooks: Arc::new(NoopTurnHooks),
            openai_transport: None,
            replicate_transport: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    /// Request timeout for the default HTTP transports.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_seed_source(mut self, seeds: Arc<dyn SeedSource>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ChatTurnHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_openai_transport(mut self, transport: Arc<dyn OpenAiTransport>) -> Self {
        self.openai_transport = Some(transport);
        self
    }

    pub fn with_replicate_transport(mut self, transport: Arc<dyn ReplicateTransport>) -> Self {
        self.replicate_transport = Some(transport);
        self
    }

    pub fn with_replicate_polling(mut self, poll_interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls;
        self
    }

    pub fn build(self) -> Result<ChatSessionFactory, ChatError> {
        let mut http = None;

        let openai_transport: Arc<dyn OpenAiTransport> = match self.openai_transport {
            Some(transport) => transport,
            None => Arc::new(OpenAiHttpTransport::new(shared_client(
                &mut http,
                self.timeout,
            )?)),
        };

        let replicate_transport: Arc<dyn ReplicateTransport> = match self.replicate_transport {
            Some(transport) => transport,
            None => Arc::new(ReplicateHttpTransport::new(shared_client(
                &mut http,
                self.timeout,
            )?)),
        };

        Ok(ChatSessionFactory {
            credentials: self.credentials,
            seeds: self.seeds,
            hooks: self.hooks,
            openai_transport,
            replicate_transport,
            poll_interval: self.poll_interval,
            max_polls: self.max_polls,
        })
    }
}

fn shared_client(slot: &mut Option<Client>, timeout: Duration) -> Result<Client, ChatError> {
    if let Some(client) = slot {
        return Ok(client.clone());
    }

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ChatError::configuration(err.to_string()))?;
    *slot = Some(client.clone());
    Ok(client)
}
