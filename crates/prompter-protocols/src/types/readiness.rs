//! Relay reachability as shown to the user.

use serde::{Deserialize, Serialize};

/// Which relay host a session is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointRole {
    /// The local development relay.
    Primary,
    /// The hosted relay.
    Fallback,
}

/// Result of a startup status probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    Ready(EndpointRole),
    ServerError,
    Offline,
}

impl ReadinessState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Status text displayed next to the indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready(EndpointRole::Primary) => "Ready (Local)",
            Self::Ready(EndpointRole::Fallback) => "Ready",
            Self::ServerError => "Server Error",
            Self::Offline => "Server Offline",
        }
    }
}
