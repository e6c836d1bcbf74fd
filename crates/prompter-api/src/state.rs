//! Application state shared by relay handlers.

use prompter_config::LimitsConfig;
use prompter_provider_gemini::GeminiClient;

use crate::rate_limit::RateLimiter;

/// Relay state. Immutable apart from the rate-limit counters.
pub struct AppState {
    pub upstream: GeminiClient,
    pub limits: LimitsConfig,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(upstream: GeminiClient, limits: LimitsConfig) -> Self {
        let rate_limiter = RateLimiter::from_config(&limits);
        Self {
            upstream,
            limits,
            rate_limiter,
        }
    }
}
