//! Upstream call errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream timed out after {0} seconds")]
    Timeout(u64),

    /// Non-success status; `message` is the upstream `error.message` when parseable.
    #[error("Upstream API error: {status}")]
    Api { status: u16, message: Option<String> },

    #[error("Invalid response from upstream: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl UpstreamError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = UpstreamError::Timeout(30);
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_api_error_display() {
        let err = UpstreamError::Api {
            status: 403,
            message: Some("API key not valid".to_string()),
        };
        assert!(err.to_string().contains("403"));
    }
}
