//! Public restaurant browsing
//!
//! | Path | Method |
//! |------|--------|
//! | /api/restaurants?open=true | GET |
//! | /api/restaurants/{id} | GET |
//! | /api/restaurants/{id}/menu | GET |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants", get(handler::list))
        .route("/api/restaurants/{id}", get(handler::get_by_id))
        .route("/api/restaurants/{id}/menu", get(handler::menu))
}
