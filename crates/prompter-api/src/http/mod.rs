//! HTTP interface module.
//!
//! - `POST /generate` - refine a rough idea into a prompt
//! - `GET /health`, `GET /` - liveness and service descriptor

pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
