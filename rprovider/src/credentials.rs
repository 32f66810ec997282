//! In-memory provider credentials with redacted debug output.
//!
//! ```rust
//! use rprovider::{CredentialStore, ProviderId};
//!
//! let mut store = CredentialStore::new();
//! store.set_openai_api_key("sk-test-123").expect("key should be accepted");
//!
//! assert!(store.has_credentials(ProviderId::OpenAi));
//! assert!(!store.has_credentials(ProviderId::Replicate));
//! assert_eq!(format!("{store:?}"), "CredentialStore { providers: [OpenAi] }");
//! ```

use rcommon::Registry;

use crate::{ProviderError, ProviderId};

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // Zero bytes are valid UTF-8, so the string stays well-formed.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// Provider keys supplied explicitly by the caller; nothing here reads the environment.
#[derive(Default, Clone)]
pub struct CredentialStore {
    keys: Registry<ProviderId, SecretString>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(
        &mut self,
        provider: ProviderId,
        api_key: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.is_empty() {
            return Err(ProviderError::authentication(format!(
                "{provider} api key must not be empty"
            )));
        }

        self.keys.insert(provider, api_key);
        Ok(())
    }

    pub fn set_openai_api_key(&mut self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.trim().is_empty() && !api_key.starts_with("sk-") {
            return Err(ProviderError::authentication(
                "OpenAI api key must start with 'sk-'",
            ));
        }

        self.set_api_key(ProviderId::OpenAi, api_key)
    }

    pub fn set_replicate_api_token(
        &mut self,
        api_token: impl Into<String>,
    ) -> Result<(), ProviderError> {
        self.set_api_key(ProviderId::Replicate, api_token)
    }

    pub fn api_key(&self, provider: ProviderId) -> Option<&SecretString> {
        self.keys.get(&provider)
    }

    pub fn has_credentials(&self, provider: ProviderId) -> bool {
        self.keys.contains_key(&provider)
    }

    pub fn clear(&mut self, provider: ProviderId) -> bool {
        self.keys.remove(&provider).is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers = [ProviderId::OpenAi, ProviderId::Replicate]
            .into_iter()
            .filter(|provider| self.has_credentials(*provider))
            .collect::<Vec<_>>();

        f.debug_struct("CredentialStore")
            .field("providers", &providers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_string_debug_is_redacted() {
        let secret = SecretString::new("sk-very-secret");

        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.expose(), "sk-very-secret");
    }

    #[test]
    fn empty_keys_are_rejected() {
        let mut store = CredentialStore::new();

        let error = store
            .set_api_key(ProviderId::Replicate, "   ")
            .expect_err("blank key should fail");
        assert_eq!(error.kind, crate::ProviderErrorKind::Authentication);
        assert!(!store.has_credentials(ProviderId::Replicate));
    }

    #[test]
    fn openai_keys_require_sk_prefix() {
        let mut store = CredentialStore::new();

        assert!(store.set_openai_api_key("pk-123").is_err());
        assert!(store.set_openai_api_key("sk-123").is_ok());
        assert_eq!(
            store
                .api_key(ProviderId::OpenAi)
                .map(SecretString::expose),
            Some("sk-123")
        );
    }

    #[test]
    fn clear_removes_credentials() {
        let mut store = CredentialStore::new();
        store
            .set_replicate_api_token("r8_token")
            .expect("token should be accepted");

        assert!(store.clear(ProviderId::Replicate));
        assert!(!store.clear(ProviderId::Replicate));
        assert!(store.api_key(ProviderId::Replicate).is_none());
    }
}
