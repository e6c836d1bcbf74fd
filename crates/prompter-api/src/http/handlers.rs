//! Request handlers for prompt generation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use prompter_protocols::{iso8601, GenerateResponse, GenerationResult};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::RelayError;
use crate::state::AppState;

/// Characters of user input written to the log.
const LOG_PREVIEW_CHARS: usize = 50;

/// `POST /generate`
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, RelayError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::PayloadTooLarge
        } else {
            RelayError::InvalidInput
        }
    })?;

    let user_input = validate_input(&payload, state.limits.max_input_chars)?;
    info!("Processing request: {}...", preview(user_input));

    let text = state
        .upstream
        .refine_prompt(user_input)
        .await
        .map_err(|e| {
            error!("Upstream generation failed: {}", e);
            RelayError::from(e)
        })?;

    let generated = GenerationResult::new(user_input, text);
    info!(
        "Successfully generated prompt ({} -> {} chars)",
        generated.input_length, generated.output_length
    );

    Ok(Json(GenerateResponse {
        timestamp: iso8601(&generated.generated_at),
        input_length: generated.input_length,
        output_length: generated.output_length,
        result: generated.text,
    }))
}

/// `userInput` must be a string with non-blank content no longer than
/// `max_chars` characters. Length is measured on the untrimmed text.
pub(crate) fn validate_input(payload: &Value, max_chars: usize) -> Result<&str, RelayError> {
    let input = payload
        .get("userInput")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(RelayError::InvalidInput)?;

    if input.chars().count() > max_chars {
        return Err(RelayError::InputTooLong(max_chars));
    }
    Ok(input)
}

fn preview(input: &str) -> String {
    input.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Catch-all for unknown paths.
pub async fn not_found() -> RelayError {
    RelayError::NotFound
}

/// Known path, wrong method.
pub async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}
