//! Authentication Routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/register | POST | none |
//! | /api/auth/login | POST | none |
//! | /api/auth/restaurantRegister | POST | none |
//! | /api/auth/restaurantLogin | POST | none |
//! | /api/auth/me | GET | bearer |

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_auth;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let protected = Router::new()
        .route("/api/auth/me", get(handler::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/auth/register", post(handler::register_customer))
        .route("/api/auth/login", post(handler::login_customer))
        .route("/api/auth/restaurantRegister", post(handler::register_restaurant))
        .route("/api/auth/restaurantLogin", post(handler::login_restaurant))
        .merge(protected)
}
