//! Error types for the AI Prompter protocol layer.

mod store;
mod user;

pub use store::*;
pub use user::*;
