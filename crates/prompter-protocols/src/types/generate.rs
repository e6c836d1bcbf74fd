//! `/generate` request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub user_input: String,
}

impl GenerateRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
        }
    }
}

/// Successful `POST /generate` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub result: String,
    pub timestamp: String,
    pub input_length: usize,
    pub output_length: usize,
}

/// Error body returned by every failing relay route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            available_endpoints: None,
        }
    }

    pub fn with_available_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.available_endpoints = Some(endpoints);
        self
    }
}

/// Outcome of one successful client-side generation. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub text: String,
    pub input_length: usize,
    pub output_length: usize,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Build a result, counting characters (not bytes) of both sides.
    pub fn new(input: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            input_length: input.chars().count(),
            output_length: text.chars().count(),
            text,
            generated_at: Utc::now(),
        }
    }
}
