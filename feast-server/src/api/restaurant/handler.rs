//! Restaurant self-service handlers

use axum::extract::{Path, State};
use http::StatusCode;
use serde_json::Value;

use crate::api::extract::{ApiJson, ValidJson};
use crate::auth::CurrentPrincipal;
use crate::core::ServerState;
use crate::services::{menu, profile};
use crate::utils::{ApiResponse, AppResult};
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemList, MenuItemUpdate, Restaurant, RestaurantStatusUpdate,
};

/// GET /api/restaurant/profile
pub async fn get_profile(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
) -> AppResult<ApiResponse<Restaurant>> {
    let id = principal.require_restaurant()?;
    let restaurant = profile::get_profile(&state.db.pool, id).await?;
    Ok(ApiResponse::success(restaurant))
}

/// PUT /api/restaurant/profile - partial overwrite
pub async fn update_profile(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<ApiResponse<Restaurant>> {
    let id = principal.require_restaurant()?;
    let restaurant = profile::update_profile(&state.db.pool, id, body).await?;
    Ok(ApiResponse::success_with_message("Profile updated", restaurant))
}

/// PUT /api/restaurant/status - open/close toggle
pub async fn update_status(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    ApiJson(payload): ApiJson<RestaurantStatusUpdate>,
) -> AppResult<ApiResponse<Restaurant>> {
    let id = principal.require_restaurant()?;
    let restaurant =
        profile::set_open_status(&state.db.pool, id, payload.open_close_status).await?;
    Ok(ApiResponse::success(restaurant))
}

/// GET /api/restaurant/menu
pub async fn list_menu(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
) -> AppResult<ApiResponse<MenuItemList>> {
    let id = principal.require_restaurant()?;
    let menu_items = menu::list_items(&state.db.pool, id).await?;
    Ok(ApiResponse::success(MenuItemList { menu_items }))
}

/// POST /api/restaurant/menu
pub async fn create_menu_item(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    ValidJson(payload): ValidJson<MenuItemCreate>,
) -> AppResult<(StatusCode, ApiResponse<MenuItem>)> {
    let item = menu::create_item(&state.db.pool, &principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Menu item created", item),
    ))
}

/// PUT /api/restaurant/menu/{id}
pub async fn update_menu_item(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<MenuItemUpdate>,
) -> AppResult<ApiResponse<MenuItem>> {
    let item = menu::update_item(&state.db.pool, &principal, id, payload).await?;
    Ok(ApiResponse::success_with_message("Menu item updated", item))
}

/// DELETE /api/restaurant/menu/{id}
pub async fn delete_menu_item(
    State(state): State<ServerState>,
    principal: CurrentPrincipal,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    menu::delete_item(&state.db.pool, &principal, id).await?;
    Ok(ApiResponse::ok())
}
