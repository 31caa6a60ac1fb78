use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::services::{menu, profile};
use crate::utils::{ApiResponse, AppResult};
use shared::models::{MenuItemList, Restaurant};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub open: Option<bool>,
}

/// GET /api/restaurants
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<Restaurant>>> {
    let restaurants = profile::list_profiles(&state.db.pool, query.open.unwrap_or(false)).await?;
    Ok(ApiResponse::success(restaurants))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Restaurant>> {
    let restaurant = profile::get_profile(&state.db.pool, id).await?;
    Ok(ApiResponse::success(restaurant))
}

/// GET /api/restaurants/{id}/menu
pub async fn menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<MenuItemList>> {
    profile::get_profile(&state.db.pool, id).await?;
    let menu_items = menu::list_items(&state.db.pool, id).await?;
    Ok(ApiResponse::success(MenuItemList { menu_items }))
}
