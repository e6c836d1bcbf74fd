//! # AI Prompter Provider - Gemini
//!
//! Google Gemini client used by the relay to refine prompts.

mod client;
mod error;
mod prompt;
mod types;

pub use client::{GeminiClient, GeminiSettings};
pub use error::UpstreamError;
pub use prompt::build_prompt;
pub use types::*;
