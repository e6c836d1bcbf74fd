//! Relay transport protocol definitions.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::UserError;
use crate::types::GenerateRequest;

/// How a client reaches one relay host.
///
/// Implementations classify failures into [`UserError`]: connection-level
/// failures become `Connectivity`, an elapsed `timeout` becomes `Timeout`,
/// non-success statuses become `Http`/`RateLimited`, and a success body
/// without a `result` string becomes `MalformedResponse`.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// `POST {base_url}/generate`, returning the relay's `result` text.
    async fn generate(
        &self,
        base_url: &str,
        request: &GenerateRequest,
        timeout: Duration,
    ) -> Result<String, UserError>;

    /// `GET {base_url}/health`, returning the HTTP status code.
    async fn health(&self, base_url: &str, timeout: Duration) -> Result<u16, UserError>;
}
