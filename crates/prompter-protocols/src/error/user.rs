//! Client-facing generation errors.

use thiserror::Error;

/// Why a generation request did not produce a result.
///
/// Every variant converts to a short, human-readable line through
/// [`UserError::user_message`]; the `Display` form is meant for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Connection failed: {0}")]
    Connectivity(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl UserError {
    /// Build an error from a non-success relay response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => Self::RateLimited(message),
            _ => Self::Http { status, message },
        }
    }

    /// Connection-level failures and timeouts may be re-attempted;
    /// structured HTTP error responses may not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity(_) | Self::Timeout)
    }

    /// The line shown to the user in place of the raw error.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::Connectivity(_) => {
                "Cannot connect to server. Please check your internet connection and try again."
                    .to_string()
            }
            Self::Timeout => "Request timed out. Please try again.".to_string(),
            Self::RateLimited(_) => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            Self::Http { status: 500, .. } => {
                "Server error. Please check your API key configuration.".to_string()
            }
            Self::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Http { .. } => "An unexpected error occurred. Please try again.".to_string(),
            Self::MalformedResponse(_) => "Invalid response from server".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
