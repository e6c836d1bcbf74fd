//! Common types shared by the relay and the client.

mod generate;
mod health;
mod history;
mod readiness;

pub use generate::*;
pub use health::*;
pub use history::*;
pub use readiness::*;

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way browsers print `Date.toISOString()`.
pub fn iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
