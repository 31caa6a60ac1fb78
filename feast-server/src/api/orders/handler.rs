//! Order handlers

use axum::extract::{Path, Query, State};
use http::StatusCode;

use crate::api::extract::ApiJson;
use crate::auth::CurrentPrincipal;
use crate::core::ServerState;
use crate::orders::engine;
use crate::utils::{ApiResponse, AppResult};
use shared::models::{Order, OrderCreate, OrderList, OrderListQuery, OrderStatusUpdate};

/// GET /api/order?filter=
pub async fn list(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    Query(query): Query<OrderListQuery>,
) -> AppResult<ApiResponse<OrderList>> {
    let restaurant_id = principal.require_restaurant()?;
    let orders = engine::list_orders(&state.db.pool, restaurant_id, query.filter.as_deref()).await?;
    Ok(ApiResponse::success(OrderList { orders }))
}

/// POST /api/order
pub async fn create(
    State(state): State<ServerState>,
    principal: Option<CurrentPrincipal>,
    ApiJson(payload): ApiJson<OrderCreate>,
) -> AppResult<(StatusCode, ApiResponse<Order>)> {
    let order = engine::create_order(&state.db.pool, principal.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Order created", order),
    ))
}

/// GET /api/order/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Order>> {
    let order = engine::get_order(&state.db.pool, &principal, id).await?;
    Ok(ApiResponse::success(order))
}

/// PUT /api/order/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<OrderStatusUpdate>,
) -> AppResult<ApiResponse<Order>> {
    let order = engine::update_status(
        &state.db.pool,
        state.order_status_policy(),
        &principal,
        id,
        &payload.status,
    )
    .await?;
    Ok(ApiResponse::success_with_message("Order status updated", order))
}
