//! Replicate prediction types and reply validation.

use std::fmt::{Display, Formatter};

use crate::{ProviderError, ProviderReply};

#[derive(Debug, Clone, PartialEq)]
pub struct ReplicateRequest {
    /// `owner/name` or `owner/name:version`.
    pub model: String,
    pub input: ReplicateInput,
}

impl ReplicateRequest {
    pub(crate) fn version(&self) -> Option<&str> {
        self.model.split_once(':').map(|(_, version)| version)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplicateInput {
    pub prompt: String,
    pub system_prompt: String,
    pub debug: bool,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
    pub max_new_tokens: Option<u32>,
    pub min_new_tokens: u32,
    pub seed: u32,
    pub stop_sequences: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    Unknown(String),
}

impl PredictionStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "starting" => Self::Starting,
            "processing" => Self::Processing,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            "canceled" => Self::Canceled,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Starting | Self::Processing)
    }
}

impl Display for PredictionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Starting => "starting",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Unknown(value) => value.as_str(),
        };

        f.write_str(status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicatePrediction {
    pub id: String,
    pub status: PredictionStatus,
    /// Output fragments in the order the model produced them.
    pub output: Vec<String>,
    pub error: Option<String>,
    pub poll_url: Option<String>,
}

impl ReplicatePrediction {
    pub(crate) fn into_reply(self) -> Result<ProviderReply, ProviderError> {
        match self.status {
            PredictionStatus::Succeeded => {
                let text = self.output.concat().trim().to_string();
                if text.is_empty() {
                    return Err(ProviderError::invalid_response(format!(
                        "Replicate prediction {} returned empty output",
                        self.id
                    )));
                }

                Ok(ProviderReply::new(text))
            }
            status => {
                let detail = self.error.unwrap_or_else(|| "no error detail".to_string());
                Err(ProviderError::invalid_response(format!(
                    "Replicate prediction {} ended with status {status}: {detail}",
                    self.id
                )))
            }
        }
    }
}
