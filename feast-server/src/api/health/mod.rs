//! Health check
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |
//!
//! ```json
//! { "name": "feast-server", "version": "0.1.0", "database": "ok" }
//! ```

use axum::{Json, Router, extract::State, routing::get};

use crate::core::ServerState;
use shared::client::HealthResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// Always 200; the database field reports whether a trivial query succeeds
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = if state.db.ping().await { "ok" } else { "unavailable" };
    Json(HealthResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
