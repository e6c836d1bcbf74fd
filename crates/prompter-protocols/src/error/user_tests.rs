use super::*;

#[test]
fn test_from_status_rate_limited() {
    let err = UserError::from_status(429, "slow down".to_string());
    assert_eq!(err, UserError::RateLimited("slow down".to_string()));
}

#[test]
fn test_from_status_other() {
    let err = UserError::from_status(503, "unavailable".to_string());
    assert!(matches!(err, UserError::Http { status: 503, .. }));
}

#[test]
fn test_retryable_classification() {
    assert!(UserError::Connectivity("refused".to_string()).is_retryable());
    assert!(UserError::Timeout.is_retryable());
    assert!(!UserError::RateLimited("x".to_string()).is_retryable());
    assert!(!UserError::InvalidInput("x".to_string()).is_retryable());
    assert!(!UserError::MalformedResponse("x".to_string()).is_retryable());
    assert!(!UserError::Http {
        status: 500,
        message: "boom".to_string()
    }
    .is_retryable());
}

#[test]
fn test_user_message_connectivity() {
    let msg = UserError::Connectivity("dns".to_string()).user_message();
    assert!(msg.starts_with("Cannot connect to server"));
}

#[test]
fn test_user_message_timeout() {
    assert_eq!(
        UserError::Timeout.user_message(),
        "Request timed out. Please try again."
    );
}

#[test]
fn test_user_message_rate_limited() {
    let msg = UserError::RateLimited("Too many requests from this IP".to_string()).user_message();
    assert!(msg.contains("wait a moment"));
}

#[test]
fn test_user_message_server_error() {
    let err = UserError::Http {
        status: 500,
        message: "Failed to generate prompt".to_string(),
    };
    assert!(err.user_message().contains("API key configuration"));
}

#[test]
fn test_user_message_passes_upstream_text_through() {
    let err = UserError::Http {
        status: 400,
        message: "Input too long. Please keep it under 1000 characters.".to_string(),
    };
    assert_eq!(
        err.user_message(),
        "Input too long. Please keep it under 1000 characters."
    );
}

#[test]
fn test_user_message_generic_fallback() {
    let err = UserError::Http {
        status: 418,
        message: "  ".to_string(),
    };
    assert_eq!(
        err.user_message(),
        "An unexpected error occurred. Please try again."
    );
}

#[test]
fn test_user_message_invalid_input() {
    let err = UserError::InvalidInput("Please enter your idea first.".to_string());
    assert_eq!(err.user_message(), "Please enter your idea first.");
}
