use super::types::*;
use crate::{Error, Result, config::GeminiConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<Generation>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model.trim_start_matches("models/")
        )
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<Generation> {
        debug!(
            "Requesting generation from {} ({} prompt bytes)",
            model,
            prompt.len()
        );

        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .http
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let response: GenerateContentResponse = serde_json::from_str(&body)?;

        debug!(
            "Received generation response with {} candidates",
            response.candidates.len()
        );

        let reason = response.missing_text_reason();
        response
            .into_generation()
            .ok_or(Error::EmptyResponse { reason })
    }
}

fn api_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => Error::Api {
            code: envelope.error.code,
            status: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => Error::Api {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or("UNKNOWN").to_string(),
            message: body.trim().to_string(),
        },
    }
}
