//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error};

use prompter_config::UpstreamConfig;

use crate::error::UpstreamError;
use crate::prompt::build_prompt;
use crate::types::*;

/// Connection parameters and fixed generation settings.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub generation: GenerationConfig,
}

impl GeminiSettings {
    pub fn from_config(config: &UpstreamConfig, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            generation: GenerationConfig {
                temperature: Some(config.temperature),
                top_k: Some(config.top_k),
                top_p: Some(config.top_p),
                max_output_tokens: Some(config.max_output_tokens),
            },
        }
    }
}

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(settings: GeminiSettings) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Refine `user_input` into a prompt, returning the first candidate's text.
    pub async fn refine_prompt(&self, user_input: &str) -> Result<String, UpstreamError> {
        let request = GenerateContentRequest::single_text(
            build_prompt(user_input),
            self.settings.generation.clone(),
        );
        let response = self.generate_content(request).await?;

        match response.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                error!(
                    "Invalid response from Gemini API: {} candidate(s)",
                    response.candidates.len()
                );
                Err(UpstreamError::InvalidResponse(
                    "missing candidates[0].content.parts[0].text".to_string(),
                ))
            }
        }
    }

    /// Generate content (non-streaming), bounded by the configured timeout.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.settings.base_url, self.settings.model, self.settings.api_key
        );
        let timeout_secs = self.settings.timeout.as_secs();

        debug!("Gemini generate_content: model={}", self.settings.model);

        let response = self
            .client
            .post(&url)
            .timeout(self.settings.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, timeout_secs))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .ok()
                .map(|e| e.error.message)
                .filter(|m| !m.is_empty());
            error!("Gemini API error: status={} message={:?}", status, message);
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
