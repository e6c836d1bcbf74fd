//! Maps orchestrator outcomes and history to terminal output.

use chrono::Local;
use prompter_protocols::{GenerationResult, HistoryEntry, ReadinessState, UserError};

/// Characters of each history field shown in the compact listing.
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Success,
    Error,
}

/// What the user sees after one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ViewState {
    pub status: String,
    pub status_kind: StatusKind,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ViewState {
    pub fn from_outcome(outcome: &Result<GenerationResult, UserError>) -> Self {
        match outcome {
            Ok(result) => Self {
                status: "Success".to_string(),
                status_kind: StatusKind::Success,
                output: Some(result.text.clone()),
                error: None,
            },
            Err(e) => Self {
                status: "Error".to_string(),
                status_kind: StatusKind::Error,
                output: None,
                error: Some(e.user_message()),
            },
        }
    }

    pub fn render(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => format!("{}: {}", self.status, error),
            (None, None) => self.status.clone(),
        }
    }
}

/// Indicator line for a probe result.
pub(crate) fn readiness_line(state: ReadinessState) -> String {
    let marker = if state.is_ready() { "●" } else { "○" };
    format!("{} {}", marker, state.label())
}

pub(crate) fn render_history(entries: &[HistoryEntry], full: bool) -> String {
    if entries.is_empty() {
        return "No history yet.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let when = entry
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M");
            if full {
                format!(
                    "[{}] {}\n  Idea:   {}\n  Prompt: {}",
                    index, when, entry.input, entry.output
                )
            } else {
                format!(
                    "[{}] {}  {}  ->  {}",
                    index,
                    when,
                    preview(&entry.input),
                    preview(&entry.output)
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= PREVIEW_CHARS {
        single_line
    } else {
        let head: String = single_line.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}
