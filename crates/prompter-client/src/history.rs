//! Capped, newest-first generation history.

use std::sync::Arc;

use prompter_protocols::{HistoryEntry, KeyValueStore, StoreError};
use tracing::{debug, warn};

/// Storage key holding the history list.
pub const HISTORY_KEY: &str = "promptHistory";

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// History list persisted as one JSON array under [`HISTORY_KEY`].
///
/// No locking: a single client session is assumed to be the only writer.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Insert at the head and trim to the limit.
    pub async fn append(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut entries = self.read().await?;
        entries.insert(0, entry);
        entries.truncate(self.limit);
        debug!("History now holds {} entries", entries.len());
        self.write(&entries).await
    }

    /// Newest first. A missing or unreadable list yields an empty one.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        match self.read().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load history: {}", e);
                Vec::new()
            }
        }
    }

    /// Remove the entry at `index`; out-of-range indices are ignored.
    pub async fn delete_at(&self, index: usize) -> Result<Option<HistoryEntry>, StoreError> {
        let mut entries = self.read().await?;
        if index >= entries.len() {
            debug!("History index {} out of range ({})", index, entries.len());
            return Ok(None);
        }
        let removed = entries.remove(index);
        self.write(&entries).await?;
        Ok(Some(removed))
    }

    async fn read(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        match self.store.get(HISTORY_KEY).await? {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    async fn write(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let value = serde_json::to_value(entries)?;
        self.store.set(HISTORY_KEY, value).await
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
