//! # AI Prompter Relay
//!
//! Stateless HTTP relay between the prompter client and the Gemini API.
//!
//! ```text
//! client ──POST /generate──▶ rate limit ─▶ validate ─▶ Gemini generateContent
//!        ◀──{result, ...}───────────────────────────────────┘
//! ```
//!
//! The only shared mutable state is the per-IP rate-limit window.

pub mod error;
pub mod http;
pub mod rate_limit;
pub mod server;
pub mod state;

pub use error::{RelayError, ServerError};
pub use http::routes::create_router;
pub use rate_limit::{RateDecision, RateLimiter};
pub use server::RelayServer;
pub use state::AppState;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "AI Prompter Backend";

/// Version reported by `/` and `/health`.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
