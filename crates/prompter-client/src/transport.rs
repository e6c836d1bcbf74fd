//! reqwest-backed relay transport.

use std::time::Duration;

use async_trait::async_trait;
use prompter_protocols::{GenerateRequest, RelayTransport, UserError};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

/// HTTP transport to a relay host.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, UserError> {
        let client = Client::builder()
            .build()
            .map_err(|e| UserError::Connectivity(e.to_string()))?;
        Ok(Self { client })
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

fn classify(err: reqwest::Error) -> UserError {
    if err.is_timeout() {
        UserError::Timeout
    } else {
        UserError::Connectivity(err.to_string())
    }
}

/// `error` from the body, else `HTTP <code>: <reason>`.
fn error_message(status: StatusCode, body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        })
}

#[async_trait]
impl RelayTransport for HttpTransport {
    async fn generate(
        &self,
        base_url: &str,
        request: &GenerateRequest,
        timeout: Duration,
    ) -> Result<String, UserError> {
        let url = endpoint(base_url, "generate");
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Value::Object(Default::default()));
            return Err(UserError::from_status(
                status.as_u16(),
                error_message(status, &body),
            ));
        }

        let body = response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                UserError::Timeout
            } else {
                UserError::MalformedResponse(e.to_string())
            }
        })?;

        body.get("result")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| UserError::MalformedResponse("missing `result` field".to_string()))
    }

    async fn health(&self, base_url: &str, timeout: Duration) -> Result<u16, UserError> {
        let url = endpoint(base_url, "health");
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
