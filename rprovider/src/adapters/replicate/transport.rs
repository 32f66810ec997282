//! Replicate transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, RequestBuilder, Response};

use crate::adapters::status_error;
use crate::{ProviderError, ProviderFuture, SecretString};

use super::serde_api::{
    ReplicateApiCreatePrediction, ReplicateApiInput, ReplicateApiPrediction,
    extract_error_message,
};
use super::types::{ReplicatePrediction, ReplicateRequest};

pub trait ReplicateTransport: Send + Sync + std::fmt::Debug {
    fn create_prediction<'a>(
        &'a self,
        request: ReplicateRequest,
        api_token: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ReplicatePrediction, ProviderError>>;

    fn get_prediction<'a>(
        &'a self,
        poll_url: &'a str,
        api_token: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ReplicatePrediction, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct ReplicateHttpTransport {
    client: Client,
    base_url: String,
}

impl ReplicateHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://api.replicate.com/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Versioned models go through the generic predictions endpoint.
    fn prediction_endpoint(&self, request: &ReplicateRequest) -> String {
        match request.version() {
            Some(_) => self.endpoint("predictions"),
            None => self.endpoint(&format!("models/{}/predictions", request.model)),
        }
    }

    async fn send(builder: RequestBuilder) -> Result<ReplicatePrediction, ProviderError> {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                ProviderError::timeout(err.to_string())
            } else {
                ProviderError::transport(err.to_string())
            }
        })?;

        tracing::debug!(status = %response.status(), "Replicate responded");
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        let parsed: ReplicateApiPrediction = response
            .json()
            .await
            .map_err(|err| ProviderError::invalid_response(err.to_string()))?;

        Ok(ReplicatePrediction::from(parsed))
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("Replicate request failed with status {status}"));

        status_error(status, message)
    }
}

impl ReplicateTransport for ReplicateHttpTransport {
    fn create_prediction<'a>(
        &'a self,
        request: ReplicateRequest,
        api_token: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ReplicatePrediction, ProviderError>> {
        Box::pin(async move {
            let url = self.prediction_endpoint(&request);
            let body = ReplicateApiCreatePrediction {
                version: request.version().map(str::to_string),
                input: ReplicateApiInput::from(request.input),
            };
            tracing::debug!(url = %url, model = %request.model, "creating Replicate prediction");

            let builder = self
                .client
                .post(url)
                .bearer_auth(api_token.expose())
                .header("Prefer", "wait")
                .json(&body);

            Self::send(builder).await
        })
    }

    fn get_prediction<'a>(
        &'a self,
        poll_url: &'a str,
        api_token: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ReplicatePrediction, ProviderError>> {
        Box::pin(async move {
            tracing::trace!(url = %poll_url, "polling Replicate prediction");
            let builder = self.client.get(poll_url).bearer_auth(api_token.expose());

            Self::send(builder).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replicate::ReplicateInput;

    fn request(model: &str) -> ReplicateRequest {
        ReplicateRequest {
            model: model.to_string(),
            input: ReplicateInput {
                prompt: "[INST] hi [/INST]".to_string(),
                system_prompt: String::new(),
                debug: false,
                top_k: 0,
                top_p: 1.0,
                temperature: 0.7,
                max_new_tokens: None,
                min_new_tokens: 0,
                seed: 7,
                stop_sequences: String::new(),
            },
        }
    }

    #[test]
    fn unversioned_models_use_the_model_predictions_endpoint() {
        let transport = ReplicateHttpTransport::new(Client::new());

        assert_eq!(
            transport.prediction_endpoint(&request("meta/llama-2-70b-chat")),
            "https://api.replicate.com/v1/models/meta/llama-2-70b-chat/predictions"
        );
    }

    #[test]
    fn versioned_models_use_the_generic_predictions_endpoint() {
        let transport =
            ReplicateHttpTransport::new(Client::new()).with_base_url("http://localhost:8080/v1/");

        assert_eq!(
            transport.prediction_endpoint(&request("meta/llama-2-70b-chat:02e509c7")),
            "http://localhost:8080/v1/predictions"
        );
    }
}
