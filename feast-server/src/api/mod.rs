//! HTTP API
//!
//! - [`health`] - liveness and database check
//! - [`auth`] - registration, login and `me`
//! - [`restaurant`] - the calling restaurant's profile and menu
//! - [`restaurants`] - public browsing
//! - [`orders`] - order placement and lifecycle

pub mod extract;

pub mod auth;
pub mod health;
pub mod orders;
pub mod restaurant;
pub mod restaurants;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Every route with its auth layers, state applied
pub fn build_router(state: ServerState) -> Router {
    let body_limit = state.config.request_body_limit_bytes;

    Router::new()
        .merge(health::router())
        .merge(auth::router(&state))
        .merge(restaurant::router(&state))
        .merge(restaurants::router())
        .merge(orders::router(&state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
