//! Scripted transport for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use prompter_protocols::{GenerateRequest, RelayTransport, UserError};

type GenerateFn = dyn Fn(&str) -> Result<String, UserError> + Send + Sync;
type HealthFn = dyn Fn(&str) -> Result<u16, UserError> + Send + Sync;

/// Answers per base URL and records every call.
pub(crate) struct StubTransport {
    on_generate: Box<GenerateFn>,
    on_health: Box<HealthFn>,
    generate_calls: Mutex<Vec<String>>,
    health_calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self {
            on_generate: Box::new(|_| Ok("Refined prompt...".to_string())),
            on_health: Box::new(|_| Ok(200)),
            generate_calls: Mutex::new(Vec::new()),
            health_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn on_generate(
        mut self,
        f: impl Fn(&str) -> Result<String, UserError> + Send + Sync + 'static,
    ) -> Self {
        self.on_generate = Box::new(f);
        self
    }

    pub(crate) fn on_health(
        mut self,
        f: impl Fn(&str) -> Result<u16, UserError> + Send + Sync + 'static,
    ) -> Self {
        self.on_health = Box::new(f);
        self
    }

    pub(crate) fn generate_calls(&self) -> Vec<String> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub(crate) fn health_calls(&self) -> Vec<String> {
        self.health_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayTransport for StubTransport {
    async fn generate(
        &self,
        base_url: &str,
        _request: &GenerateRequest,
        _timeout: Duration,
    ) -> Result<String, UserError> {
        self.generate_calls.lock().unwrap().push(base_url.to_string());
        (self.on_generate)(base_url)
    }

    async fn health(&self, base_url: &str, _timeout: Duration) -> Result<u16, UserError> {
        self.health_calls.lock().unwrap().push(base_url.to_string());
        (self.on_health)(base_url)
    }
}
