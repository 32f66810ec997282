//! Environment-driven configuration for applications built on the facade.

use std::time::Duration;

use rchat::{ChatError, DEFAULT_HTTP_TIMEOUT};
use rprovider::{ChatOptions, CredentialStore, ModelId};

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const REPLICATE_API_TOKEN_VAR: &str = "REPLICATE_API_TOKEN";
pub const MODEL_VAR: &str = "RUBRIC_MODEL";
pub const HTTP_TIMEOUT_VAR: &str = "RUBRIC_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct RubricConfig {
    pub credentials: CredentialStore,
    pub model: ModelId,
    pub http_timeout: Duration,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialStore::new(),
            model: ModelId::Gpt4Turbo,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl RubricConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ChatError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Unset or
    /// blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(key) = lookup(OPENAI_API_KEY_VAR) {
            config
                .credentials
                .set_openai_api_key(key.trim())
                .map_err(|err| {
                    ChatError::configuration(format!("{OPENAI_API_KEY_VAR}: {}", err.message))
                })?;
        }
        if let Some(token) = lookup(REPLICATE_API_TOKEN_VAR) {
            config
                .credentials
                .set_replicate_api_token(token.trim())
                .map_err(|err| {
                    ChatError::configuration(format!("{REPLICATE_API_TOKEN_VAR}: {}", err.message))
                })?;
        }
        if let Some(model) = lookup(MODEL_VAR) {
            config.model = ModelId::parse(&model).ok_or_else(|| {
                ChatError::configuration(format!("{MODEL_VAR}: unsupported model '{model}'"))
            })?;
        }
        if let Some(seconds) = lookup(HTTP_TIMEOUT_VAR) {
            let seconds: u64 = seconds.trim().parse().map_err(|_| {
                ChatError::configuration(format!(
                    "{HTTP_TIMEOUT_VAR} must be a whole number of seconds, got '{seconds}'"
                ))
            })?;
            config.http_timeout = Duration::from_secs(seconds);
        }

        tracing::debug!(
            model = %config.model,
            credentials = ?config.credentials,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Default options for sessions on the configured model.
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions::new(self.model.alias())
    }
}
