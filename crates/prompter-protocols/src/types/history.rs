//! Generation history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One past generation, stored newest-first by the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input: String,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            timestamp: Utc::now(),
        }
    }
}
