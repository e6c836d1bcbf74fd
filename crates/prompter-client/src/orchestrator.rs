//! Drives one generation request through validation, fallback and retries.

use std::sync::Arc;
use std::time::Duration;

use prompter_config::ClientConfig;
use prompter_protocols::{
    EndpointRole, GenerateRequest, GenerationResult, HistoryEntry, KeyValueStore,
    ReadinessState, RelayTransport, UserError, MAX_INPUT_CHARS,
};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::endpoint::EndpointState;
use crate::history::{HistoryStore, DEFAULT_HISTORY_LIMIT};
use crate::prober::{StatusProber, DEFAULT_PROBE_TIMEOUT};
use crate::retry::RetryPolicy;

/// Default `/generate` timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Trimmed `input`, or the message shown when it cannot be sent.
pub fn validate_input(input: &str, max_chars: usize) -> Result<&str, UserError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(UserError::InvalidInput(
            "Please enter your idea first.".to_string(),
        ));
    }
    if text.chars().count() > max_chars {
        return Err(UserError::InvalidInput(format!(
            "Input is too long. Please keep it under {} characters.",
            max_chars
        )));
    }
    Ok(text)
}

/// One client session.
///
/// Owns the endpoint selection; `generate` takes `&mut self`, so a session
/// has at most one call in flight.
pub struct Orchestrator {
    transport: Arc<dyn RelayTransport>,
    history: HistoryStore,
    endpoints: EndpointState,
    retry: RetryPolicy,
    request_timeout: Duration,
    probe_timeout: Duration,
    max_input_chars: usize,
}

impl Orchestrator {
    pub fn new(
        transport: Arc<dyn RelayTransport>,
        store: Arc<dyn KeyValueStore>,
        endpoints: EndpointState,
    ) -> Self {
        Self {
            transport,
            history: HistoryStore::new(store, DEFAULT_HISTORY_LIMIT),
            endpoints,
            retry: RetryPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            max_input_chars: MAX_INPUT_CHARS,
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        transport: Arc<dyn RelayTransport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            transport,
            history: HistoryStore::new(store, config.history_limit),
            endpoints: EndpointState::from_config(config),
            retry: RetryPolicy::from_config(config),
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
            probe_timeout: Duration::from_secs(config.probe_timeout_seconds),
            max_input_chars: MAX_INPUT_CHARS,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoints(&self) -> &EndpointState {
        &self.endpoints
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Probe relay hosts; may move the session to the fallback.
    pub async fn check_status(&mut self) -> ReadinessState {
        StatusProber::new(self.transport.clone(), self.probe_timeout)
            .probe(&mut self.endpoints)
            .await
    }

    /// Generate a refined prompt for `input`.
    ///
    /// Failure policy, evaluated after each failed attempt:
    /// 1. first attempt on the primary: switch to the fallback and retry at once;
    /// 2. retryable error with attempts left: wait `base_delay * (attempt + 1)`;
    /// 3. otherwise return the error.
    pub async fn generate(&mut self, input: &str) -> Result<GenerationResult, UserError> {
        let text = validate_input(input, self.max_input_chars)?;
        let request = GenerateRequest::new(text);
        let mut attempt: u32 = 0;

        loop {
            debug!(
                "Generate attempt {} via {}",
                attempt + 1,
                self.endpoints.active_url()
            );

            let error = match self
                .transport
                .generate(self.endpoints.active_url(), &request, self.request_timeout)
                .await
            {
                Ok(output) => {
                    let result = GenerationResult::new(text, output);
                    info!(
                        "Generated prompt after {} attempt(s) ({} chars)",
                        attempt + 1,
                        result.output_length
                    );
                    self.record_history(text, &result.text).await;
                    return Ok(result);
                }
                Err(e) => e,
            };

            if attempt == 0 && self.endpoints.active_role() == EndpointRole::Primary {
                warn!("Primary relay failed ({}), switching to fallback", error);
                self.endpoints.switch_to_fallback();
            } else if self.retry.allows_retry(attempt) && error.is_retryable() {
                let delay = self.retry.delay_for_attempt(attempt);
                warn!(
                    "Generate failed (attempt {}): {}, retrying in {:?}",
                    attempt + 1,
                    error,
                    delay
                );
                sleep(delay).await;
            } else {
                warn!("Generate failed after {} attempt(s): {}", attempt + 1, error);
                return Err(error);
            }

            attempt += 1;
        }
    }

    async fn record_history(&self, input: &str, output: &str) {
        if let Err(e) = self.history.append(HistoryEntry::new(input, output)).await {
            warn!("Failed to save history: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
