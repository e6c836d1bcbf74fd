//! HTTP route definitions.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, request::Parts, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use prompter_config::CorsMode;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::error::RelayError;
use crate::http::handlers::{generate, method_not_allowed, not_found};
use crate::http::monitoring;
use crate::rate_limit::rate_limit;
use crate::state::AppState;

/// Build the relay router.
///
/// ```text
/// GET  /             - Service descriptor
/// GET  /favicon.ico  - 204
/// GET  /health       - Health check
/// POST /generate     - Prompt refinement
/// *                  - 404 with the list of endpoints
/// ```
///
/// Every route, including the fallbacks, passes through the rate limiter.
pub fn create_router(state: Arc<AppState>, cors_mode: CorsMode) -> Router {
    let body_limit = state.limits.body_limit_bytes;

    Router::new()
        .route("/", get(monitoring::service_descriptor))
        .route("/favicon.ico", get(monitoring::favicon))
        .route("/health", get(monitoring::health_check))
        .route("/generate", post(generate))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(cors_mode))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(mode: CorsMode) -> CorsLayer {
    match mode {
        CorsMode::Any => CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(cors::Any)
            .allow_headers(cors::Any),
        CorsMode::Extension => CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                |origin: &HeaderValue, _parts: &Parts| {
                    origin.to_str().map(is_extension_origin).unwrap_or(false)
                },
            ))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    }
}

/// Browser-extension pages and local development servers.
fn is_extension_origin(origin: &str) -> bool {
    origin.starts_with("chrome-extension://")
        || origin == "http://localhost"
        || origin.starts_with("http://localhost:")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Unhandled error: {}", detail);
    RelayError::Unhandled.into_response()
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
