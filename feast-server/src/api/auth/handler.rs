//! Authentication Handlers
//!
//! Registration returns the created principal without a token; clients log
//! in afterwards.

use axum::extract::State;
use http::StatusCode;

use crate::api::extract::ValidJson;
use crate::auth::{CurrentPrincipal, PrincipalKind, credentials};
use crate::core::ServerState;
use crate::db::repository::{customer, restaurant};
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::client::{
    CurrentPrincipalResponse, CustomerLoginResponse, LoginRequest, RestaurantLoginResponse,
};
use shared::models::{CustomerCreate, CustomerSummary, RestaurantCreate, RestaurantSummary};

fn issue_token(
    state: &ServerState,
    id: i64,
    kind: PrincipalKind,
    username: &str,
) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(id, kind, username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
}

/// POST /api/auth/register - customer signup
pub async fn register_customer(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<CustomerCreate>,
) -> AppResult<(StatusCode, ApiResponse<CustomerSummary>)> {
    let created = credentials::register_customer(&state.db.pool, &payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message(
            "User registered successfully",
            CustomerSummary::from(&created),
        ),
    ))
}

/// POST /api/auth/login - customer login
pub async fn login_customer(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<ApiResponse<CustomerLoginResponse>> {
    let user = credentials::verify_customer(&state.db.pool, &req.username, &req.password).await?;
    let token = issue_token(&state, user.id, PrincipalKind::Customer, &user.username)?;

    security_log!("INFO", "login_success", kind = "customer", principal_id = user.id);
    tracing::info!(customer_id = user.id, username = %user.username, "Customer logged in");

    Ok(ApiResponse::success(CustomerLoginResponse {
        token,
        user: CustomerSummary::from(&user),
    }))
}

/// POST /api/auth/restaurantRegister - restaurant signup
pub async fn register_restaurant(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<RestaurantCreate>,
) -> AppResult<(StatusCode, ApiResponse<RestaurantSummary>)> {
    let created = credentials::register_restaurant(&state.db.pool, &payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message(
            "Restaurant registered successfully",
            RestaurantSummary::from(&created),
        ),
    ))
}

/// POST /api/auth/restaurantLogin - restaurant login
pub async fn login_restaurant(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<ApiResponse<RestaurantLoginResponse>> {
    let restaurant =
        credentials::verify_restaurant(&state.db.pool, &req.username, &req.password).await?;
    let token = issue_token(
        &state,
        restaurant.id,
        PrincipalKind::Restaurant,
        &restaurant.username,
    )?;

    security_log!(
        "INFO",
        "login_success",
        kind = "restaurant",
        principal_id = restaurant.id
    );
    tracing::info!(
        restaurant_id = restaurant.id,
        username = %restaurant.username,
        "Restaurant logged in"
    );

    Ok(ApiResponse::success(RestaurantLoginResponse {
        token,
        restaurant: RestaurantSummary::from(&restaurant),
    }))
}

/// GET /api/auth/me - the authenticated principal
pub async fn me(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
) -> AppResult<ApiResponse<CurrentPrincipalResponse>> {
    let pool = &state.db.pool;
    let body = match principal.kind {
        PrincipalKind::Restaurant => CurrentPrincipalResponse::Restaurant {
            restaurant: restaurant::find_by_id(pool, principal.id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::PrincipalNotFound))?,
        },
        PrincipalKind::Customer => CurrentPrincipalResponse::Customer {
            user: customer::find_by_id(pool, principal.id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::PrincipalNotFound))?,
        },
    };
    Ok(ApiResponse::success(body))
}
