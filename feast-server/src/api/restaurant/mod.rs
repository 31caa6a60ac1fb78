//! Restaurant self-service API
//!
//! The authenticated restaurant's profile, open/closed flag and menu.
//! Every route requires a restaurant token.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_auth;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/api/restaurant/profile",
            get(handler::get_profile).put(handler::update_profile),
        )
        .route("/api/restaurant/status", put(handler::update_status))
        .route(
            "/api/restaurant/menu",
            get(handler::list_menu).post(handler::create_menu_item),
        )
        .route(
            "/api/restaurant/menu/{id}",
            put(handler::update_menu_item).delete(handler::delete_menu_item),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
