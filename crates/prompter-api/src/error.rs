//! Relay error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prompter_protocols::ErrorBody;
use prompter_provider_gemini::UpstreamError;
use thiserror::Error;

/// Every failure a relay route can answer with.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing, non-string or blank `userInput`, or an unreadable body.
    #[error("Invalid input. Please provide a non-empty string.")]
    InvalidInput,

    #[error("Input too long. Please keep it under {0} characters.")]
    InputTooLong(usize),

    #[error("Request body too large.")]
    PayloadTooLarge,

    #[error("Request timeout. Please try again.")]
    Timeout,

    /// Upstream answered with a non-success status.
    #[error("Failed to generate prompt. API Error: {}", .0.as_deref().unwrap_or("Unknown error"))]
    Upstream(Option<String>),

    #[error("Invalid response from AI service.")]
    InvalidUpstreamResponse,

    /// Transport failure talking to upstream; the detail is logged, not returned.
    #[error("Internal server error. Please try again later.")]
    Internal(String),

    #[error("Too many requests from this IP, please try again later.")]
    RateLimited,

    #[error("Endpoint not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Panic caught by the outermost layer.
    #[error("Something went wrong. Please try again.")]
    Unhandled,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::InputTooLong(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream(_)
            | Self::InvalidUpstreamResponse
            | Self::Internal(_)
            | Self::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let body = ErrorBody::new(self.to_string());
        match self {
            Self::NotFound => body.with_available_endpoints(vec![
                "/health".to_string(),
                "/generate".to_string(),
            ]),
            _ => body,
        }
    }
}

impl From<UpstreamError> for RelayError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout(_) => Self::Timeout,
            UpstreamError::Api { message, .. } => Self::Upstream(message),
            UpstreamError::InvalidResponse(_) => Self::InvalidUpstreamResponse,
            UpstreamError::Network(detail) => Self::Internal(detail),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Errors that stop the relay from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upstream client error: {0}")]
    Upstream(#[from] UpstreamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::InvalidInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::InputTooLong(1000).status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(RelayError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            RelayError::Upstream(None).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RelayError::InputTooLong(1000).to_string(),
            "Input too long. Please keep it under 1000 characters."
        );
        assert_eq!(
            RelayError::Upstream(Some("API key not valid".to_string())).to_string(),
            "Failed to generate prompt. API Error: API key not valid"
        );
        assert_eq!(
            RelayError::Upstream(None).to_string(),
            "Failed to generate prompt. API Error: Unknown error"
        );
    }

    #[test]
    fn test_not_found_lists_endpoints() {
        let body = RelayError::NotFound.body();
        assert_eq!(body.error, "Endpoint not found");
        assert_eq!(
            body.available_endpoints,
            Some(vec!["/health".to_string(), "/generate".to_string()])
        );
        assert!(RelayError::Timeout.body().available_endpoints.is_none());
    }

    #[test]
    fn test_from_upstream_error() {
        assert!(matches!(
            RelayError::from(UpstreamError::Timeout(30)),
            RelayError::Timeout
        ));
        assert!(matches!(
            RelayError::from(UpstreamError::InvalidResponse("x".into())),
            RelayError::InvalidUpstreamResponse
        ));
        assert!(matches!(
            RelayError::from(UpstreamError::Network("refused".into())),
            RelayError::Internal(_)
        ));
        assert!(matches!(
            RelayError::from(UpstreamError::Api {
                status: 403,
                message: Some("denied".into())
            }),
            RelayError::Upstream(Some(_))
        ));
    }
}
