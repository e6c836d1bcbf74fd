//! Health check and service descriptor handlers.

use axum::{http::StatusCode, Json};
use chrono::Utc;
use prompter_protocols::{iso8601, EndpointList, HealthResponse, ServiceDescriptor};

use crate::{SERVICE_NAME, SERVICE_VERSION};

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: iso8601(&Utc::now()),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}

/// `GET /`
pub async fn service_descriptor() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        message: "AI Prompter Backend API".to_string(),
        version: SERVICE_VERSION.to_string(),
        endpoints: EndpointList {
            health: "/health".to_string(),
            generate: "/generate (POST)".to_string(),
        },
        status: "running".to_string(),
    })
}

/// `GET /favicon.ico`
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
