//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/order | GET | restaurant |
//! | /api/order | POST | optional |
//! | /api/order/{id} | GET | restaurant |
//! | /api/order/{id}/status | PUT | restaurant |
//!
//! Placing an order does not need a token; when one is sent it must be
//! valid.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{optional_auth, require_auth};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let protected = Router::new()
        .route("/api/order", get(handler::list))
        .route("/api/order/{id}", get(handler::get_by_id))
        .route("/api/order/{id}/status", put(handler::update_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let open = Router::new()
        .route("/api/order", post(handler::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    protected.merge(open)
}
