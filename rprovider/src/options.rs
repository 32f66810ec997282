//! Caller-facing chat options and their fully materialized form.
//!
//! ```rust
//! use rcommon::FixedSeedSource;
//! use rprovider::{ChatOptions, ModelId, UNBOUNDED_MAX_TOKENS};
//!
//! let options = ChatOptions::new("gpt-4-turbo").with_temperature(0.2);
//! let resolved = options.materialize(ModelId::Gpt4Turbo, &FixedSeedSource::new(9));
//!
//! assert_eq!(resolved.temperature, 0.2);
//! assert_eq!(resolved.seed, 9);
//! assert_eq!(resolved.max_tokens, UNBOUNDED_MAX_TOKENS);
//! ```

use std::collections::BTreeMap;

use rcommon::SeedSource;

use crate::{ModelId, ProviderError};

pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_PROBABILITY: f32 = 1.0;
pub const DEFAULT_TOP_TOKENS: u32 = 50;
/// Sentinel meaning "no limit"; adapters leave the field off the wire.
pub const UNBOUNDED_MAX_TOKENS: u32 = u32::MAX;
pub const DEFAULT_MIN_TOKENS: u32 = 0;
pub const DEFAULT_SYSTEM_CONTEXT: &str = "You are a helpful assistant.";
pub const DEFAULT_CHOICES: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub stop_sequences: Option<Vec<String>>,
    pub seed: Option<u32>,
    pub top_probability: Option<f32>,
    pub top_tokens: Option<u32>,
    pub max_tokens: Option<u32>,
    pub min_tokens: Option<u32>,
    pub debug: Option<bool>,
    pub system_context: Option<String>,
    pub choices: Option<u32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub logit_bias: Option<BTreeMap<u32, f32>>,
}

impl ChatOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            stop_sequences: None,
            seed: None,
            top_probability: None,
            top_tokens: None,
            max_tokens: None,
            min_tokens: None,
            debug: None,
            system_context: None,
            choices: None,
            frequency_penalty: None,
            presence_penalty: None,
            logit_bias: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_stop_sequences<I, S>(mut self, stop_sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_sequences = Some(stop_sequences.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_top_probability(mut self, top_probability: f32) -> Self {
        self.top_probability = Some(top_probability);
        self
    }

    pub fn with_top_tokens(mut self, top_tokens: u32) -> Self {
        self.top_tokens = Some(top_tokens);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_min_tokens(mut self, min_tokens: u32) -> Self {
        self.min_tokens = Some(min_tokens);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn with_system_context(mut self, system_context: impl Into<String>) -> Self {
        self.system_context = Some(system_context.into());
        self
    }

    pub fn with_choices(mut self, choices: u32) -> Self {
        self.choices = Some(choices);
        self
    }

    pub fn with_frequency_penalty(mut self, frequency_penalty: f32) -> Self {
        self.frequency_penalty = Some(frequency_penalty);
        self
    }

    pub fn with_presence_penalty(mut self, presence_penalty: f32) -> Self {
        self.presence_penalty = Some(presence_penalty);
        self
    }

    pub fn with_logit_bias(mut self, token: u32, bias: f32) -> Self {
        self.logit_bias
            .get_or_insert_with(BTreeMap::new)
            .insert(token, bias);
        self
    }

    /// Fills every absent field with its default. The seed source is consulted
    /// only when no seed was given.
    pub fn materialize(&self, model: ModelId, seeds: &dyn SeedSource) -> ResolvedChatOptions {
        ResolvedChatOptions {
            model,
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            stop_sequences: self.stop_sequences.clone().unwrap_or_default(),
            seed: self.seed.unwrap_or_else(|| seeds.next_seed()),
            top_probability: self.top_probability.unwrap_or(DEFAULT_TOP_PROBABILITY),
            top_tokens: self.top_tokens.unwrap_or(DEFAULT_TOP_TOKENS),
            max_tokens: self.max_tokens.unwrap_or(UNBOUNDED_MAX_TOKENS),
            min_tokens: self.min_tokens.unwrap_or(DEFAULT_MIN_TOKENS),
            debug: self.debug.unwrap_or(false),
            system_context: self
                .system_context
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_CONTEXT.to_string()),
            choices: self.choices.unwrap_or(DEFAULT_CHOICES),
            frequency_penalty: self.frequency_penalty.unwrap_or(0.0),
            presence_penalty: self.presence_penalty.unwrap_or(0.0),
            logit_bias: self.logit_bias.clone().unwrap_or_default(),
        }
    }
}

/// Options with every field concrete, fixed for the lifetime of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChatOptions {
    pub model: ModelId,
    pub temperature: f32,
    pub stop_sequences: Vec<String>,
    pub seed: u32,
    pub top_probability: f32,
    pub top_tokens: u32,
    pub max_tokens: u32,
    pub min_tokens: u32,
    pub debug: bool,
    pub system_context: String,
    pub choices: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub logit_bias: BTreeMap<u32, f32>,
}

impl ResolvedChatOptions {
    /// `None` when the output length is unbounded.
    pub fn max_tokens_limit(&self) -> Option<u32> {
        (self.max_tokens != UNBOUNDED_MAX_TOKENS).then_some(self.max_tokens)
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ProviderError::invalid_request(
                "temperature must be in range [0.0, 2.0]",
            ));
        }

        if !(0.0..=1.0).contains(&self.top_probability) {
            return Err(ProviderError::invalid_request(
                "top probability must be in range [0.0, 1.0]",
            ));
        }

        if self.top_tokens == 0 {
            return Err(ProviderError::invalid_request(
                "top tokens must be greater than zero",
            ));
        }

        if self.max_tokens == 0 {
            return Err(ProviderError::invalid_request(
                "max tokens must be greater than zero",
            ));
        }

        if self.min_tokens > self.max_tokens {
            return Err(ProviderError::invalid_request(
                "min tokens must not exceed max tokens",
            ));
        }

        if self.choices == 0 {
            return Err(ProviderError::invalid_request(
                "choices must be greater than zero",
            ));
        }

        for (name, penalty) in [
            ("frequency penalty", self.frequency_penalty),
            ("presence penalty", self.presence_penalty),
        ] {
            if !(-2.0..=2.0).contains(&penalty) {
                return Err(ProviderError::invalid_request(format!(
                    "{name} must be in range [-2.0, 2.0]"
                )));
            }
        }

        if self
            .logit_bias
            .values()
            .any(|bias| !(-100.0..=100.0).contains(bias))
        {
            return Err(ProviderError::invalid_request(
                "logit bias values must be in range [-100.0, 100.0]",
            ));
        }

        Ok(())
    }
}
