//! # AI Prompter Client
//!
//! One client session against the relay:
//!
//! - [`Orchestrator`] - validation, primary/fallback switch, bounded retries
//! - [`StatusProber`] - startup reachability check
//! - [`HistoryStore`] - capped newest-first history over a [`KeyValueStore`]
//! - [`HttpTransport`] - reqwest-backed [`RelayTransport`]
//!
//! [`KeyValueStore`]: prompter_protocols::KeyValueStore
//! [`RelayTransport`]: prompter_protocols::RelayTransport

pub mod endpoint;
pub mod history;
pub mod orchestrator;
pub mod prober;
pub mod retry;
pub mod store;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use endpoint::EndpointState;
pub use history::{HistoryStore, DEFAULT_HISTORY_LIMIT, HISTORY_KEY};
pub use orchestrator::{validate_input, Orchestrator};
pub use prober::StatusProber;
pub use retry::RetryPolicy;
pub use store::{FileStore, MemoryStore};
pub use transport::HttpTransport;
