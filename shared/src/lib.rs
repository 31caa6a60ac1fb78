//! Shared types for the Feast marketplace
//!
//! Domain models, request/response DTOs, the unified error system and
//! id/time helpers used by both feast-server and feast-client.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
