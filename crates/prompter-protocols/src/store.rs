//! Key-value storage protocol definitions.

use async_trait::async_trait;

use crate::error::StoreError;

/// The client's persisted key-value capability (extension local storage).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if never written.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;
}
