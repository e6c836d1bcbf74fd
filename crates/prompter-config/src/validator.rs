//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_upstream(config, &mut result);
        Self::validate_limits(config, &mut result);
        Self::validate_client(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_upstream(config: &Config, result: &mut ValidationResult) {
        let upstream = &config.upstream;

        if upstream.model.trim().is_empty() {
            result.add_error(ValidationError::new("upstream.model", "Model cannot be empty"));
        }

        if !is_http_url(&upstream.base_url) {
            result.add_error(ValidationError::new(
                "upstream.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if upstream.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "upstream.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if !(0.0..=2.0).contains(&upstream.temperature) {
            result.add_error(ValidationError::new(
                "upstream.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if !(0.0..=1.0).contains(&upstream.top_p) {
            result.add_error(ValidationError::new(
                "upstream.top_p",
                "top_p must be between 0.0 and 1.0",
            ));
        }
    }

    fn validate_limits(config: &Config, result: &mut ValidationResult) {
        let limits = &config.limits;

        if limits.max_input_chars == 0 {
            result.add_error(ValidationError::new(
                "limits.max_input_chars",
                "max_input_chars must be greater than 0",
            ));
        }

        if limits.rate_limit_max == 0 || limits.rate_limit_window_seconds == 0 {
            result.add_error(ValidationError::new(
                "limits.rate_limit",
                "rate limit count and window must be greater than 0",
            ));
        }

        if limits.body_limit_bytes < limits.max_input_chars.saturating_mul(4) {
            result.add_warning(ValidationWarning::new(
                "limits.body_limit_bytes",
                "body limit is smaller than the largest valid input",
            ));
        }
    }

    fn validate_client(config: &Config, result: &mut ValidationResult) {
        let client = &config.client;

        for (path, url) in [
            ("client.primary_url", &client.primary_url),
            ("client.fallback_url", &client.fallback_url),
        ] {
            if !is_http_url(url) {
                result.add_error(ValidationError::new(
                    path,
                    "URL must start with http:// or https://",
                ));
            }
        }

        if client.primary_url.trim_end_matches('/') == client.fallback_url.trim_end_matches('/') {
            result.add_warning(ValidationWarning::new(
                "client.fallback_url",
                "fallback_url equals primary_url, fallback switching has no effect",
            ));
        }

        if client.history_limit == 0 {
            result.add_error(ValidationError::new(
                "client.history_limit",
                "history_limit must be greater than 0",
            ));
        }

        if client.request_timeout_seconds == 0 || client.probe_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "client.timeouts",
                "timeouts must be greater than 0",
            ));
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
