//! # AI Prompter Protocols
//!
//! Shared definitions for the relay and the client.
//! Contains only wire types, errors and interface traits - no implementations.
//!
//! ## Core Traits
//!
//! - [`RelayTransport`] - How the client reaches a relay host
//! - [`KeyValueStore`] - The client's persisted key-value capability

pub mod error;
pub mod store;
pub mod transport;
pub mod types;

pub use error::{StoreError, UserError};
pub use store::KeyValueStore;
pub use transport::RelayTransport;
pub use types::*;

/// Maximum accepted input length, in characters.
pub const MAX_INPUT_CHARS: usize = 1000;
