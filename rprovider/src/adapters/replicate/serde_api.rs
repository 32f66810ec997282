//! Replicate HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{PredictionStatus, ReplicateInput, ReplicatePrediction};

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ReplicateApiErrorBody>(body).ok()?;
    parsed.detail.or(parsed.title)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplicateApiErrorBody {
    pub title: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplicateApiCreatePrediction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub input: ReplicateApiInput,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplicateApiInput {
    pub prompt: String,
    pub system_prompt: String,
    pub debug: bool,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    pub min_new_tokens: u32,
    pub seed: u32,
    pub stop_sequences: String,
}

impl From<ReplicateInput> for ReplicateApiInput {
    fn from(value: ReplicateInput) -> Self {
        Self {
            prompt: value.prompt,
            system_prompt: value.system_prompt,
            debug: value.debug,
            top_k: value.top_k,
            top_p: value.top_p,
            temperature: value.temperature,
            max_new_tokens: value.max_new_tokens,
            min_new_tokens: value.min_new_tokens,
            seed: value.seed,
            stop_sequences: value.stop_sequences,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplicateApiPrediction {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub output: Value,
    pub error: Option<Value>,
    pub urls: Option<ReplicateApiUrls>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplicateApiUrls {
    pub get: Option<String>,
}

/// Language models stream fragments as a string array; some return one string.
fn output_fragments(output: Value) -> Vec<String> {
    match output {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(text) => vec![text],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

impl From<ReplicateApiPrediction> for ReplicatePrediction {
    fn from(value: ReplicateApiPrediction) -> Self {
        let error = value.error.and_then(|error| match error {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        });

        Self {
            id: value.id,
            status: PredictionStatus::parse(&value.status),
            output: output_fragments(value.output),
            error,
            poll_url: value.urls.and_then(|urls| urls.get),
        }
    }
}
