//! Menu Service
//!
//! Menu items belong to one restaurant for life. Creation takes the owner
//! from the caller; update and delete require the caller to be that owner.

use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

use crate::auth::{CurrentPrincipal, ensure_owner};
use crate::db::repository::menu_item;
use crate::orders::money::is_valid_price;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
        .with_detail("menuItemId", id)
}

fn check_price(price: f64) -> Result<(), AppError> {
    if is_valid_price(price) {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::MenuItemInvalidPrice).with_detail("price", price))
    }
}

/// Load an item and verify the caller owns it
async fn owned_item(
    pool: &SqlitePool,
    principal: &CurrentPrincipal,
    id: i64,
) -> Result<MenuItem, AppError> {
    let item = menu_item::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_owner(principal, item.restaurant_id)?;
    Ok(item)
}

pub async fn create_item(
    pool: &SqlitePool,
    principal: &CurrentPrincipal,
    data: MenuItemCreate,
) -> Result<MenuItem, AppError> {
    let restaurant_id = principal.require_restaurant()?;
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.category, "category", MAX_NAME_LEN)?;
    if data.description.len() > MAX_NOTE_LEN {
        return Err(AppError::validation(format!(
            "description is too long ({} chars, max {MAX_NOTE_LEN})",
            data.description.len()
        )));
    }
    if data.image.len() > MAX_URL_LEN {
        return Err(AppError::validation(format!(
            "image is too long ({} chars, max {MAX_URL_LEN})",
            data.image.len()
        )));
    }
    check_price(data.price)?;

    let item = menu_item::create(pool, restaurant_id, data).await?;
    tracing::info!(menu_item_id = item.id, restaurant_id, name = %item.name, "Menu item created");
    Ok(item)
}

/// Every item of one restaurant
pub async fn list_items(pool: &SqlitePool, restaurant_id: i64) -> Result<Vec<MenuItem>, AppError> {
    Ok(menu_item::find_by_restaurant(pool, restaurant_id).await?)
}

pub async fn update_item(
    pool: &SqlitePool,
    principal: &CurrentPrincipal,
    id: i64,
    data: MenuItemUpdate,
) -> Result<MenuItem, AppError> {
    owned_item(pool, principal, id).await?;
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &data.category {
        validate_required_text(category, "category", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
    if let Some(price) = data.price {
        check_price(price)?;
    }

    let item = menu_item::update(pool, id, data).await?;
    tracing::info!(menu_item_id = id, restaurant_id = item.restaurant_id, "Menu item updated");
    Ok(item)
}

pub async fn delete_item(
    pool: &SqlitePool,
    principal: &CurrentPrincipal,
    id: i64,
) -> Result<(), AppError> {
    let item = owned_item(pool, principal, id).await?;
    if !menu_item::delete(pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(menu_item_id = id, restaurant_id = item.restaurant_id, "Menu item deleted");
    Ok(())
}
