//! Order Engine
//!
//! Creation prices every line from the menu as it is at that moment and
//! snapshots name and unit price into the order. Status changes run the
//! checks in a fixed order: status text, order existence, ownership,
//! transition policy.

use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderCreate, OrderItem, OrderStatus};
use sqlx::SqlitePool;

use super::money;
use super::status::{TransitionPolicy, parse_status};
use crate::auth::{CurrentPrincipal, ensure_owner};
use crate::db::repository::order::NewOrder;
use crate::db::repository::{menu_item, order, restaurant};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};

/// Most lines one order may carry
pub const MAX_ORDER_LINES: usize = 100;

/// Largest quantity allowed on a single line
pub const MAX_LINE_QUANTITY: i64 = 1000;

fn order_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        .with_detail("orderId", id)
}

/// Price and persist a new order with status `pending`
///
/// `restaurant_id` falls back to the caller when a restaurant places an
/// order for itself. Every referenced menu item must exist and belong to
/// that restaurant; availability is not checked.
pub async fn create_order(
    pool: &SqlitePool,
    principal: Option<&CurrentPrincipal>,
    data: OrderCreate,
) -> Result<Order, AppError> {
    let restaurant_id = data
        .restaurant_id
        .or_else(|| principal.filter(|p| p.is_restaurant()).map(|p| p.id))
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::RequiredField, "restaurantId is required")
                .with_detail("field", "restaurantId")
        })?;

    validate_required_text(&data.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(&data.customer_contact, "customerContact", MAX_SHORT_TEXT_LEN)?;
    if data.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if data.items.len() > MAX_ORDER_LINES {
        return Err(AppError::new(ErrorCode::OrderTooLarge)
            .with_detail("lines", data.items.len())
            .with_detail("max", MAX_ORDER_LINES));
    }
    if let Some(bad) = data
        .items
        .iter()
        .find(|i| !(1..=MAX_LINE_QUANTITY).contains(&i.quantity))
    {
        return Err(AppError::new(ErrorCode::InvalidQuantity)
            .with_detail("menuItemId", bad.menu_item_id)
            .with_detail("quantity", bad.quantity));
    }

    if restaurant::find_by_id(pool, restaurant_id).await?.is_none() {
        return Err(
            AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurantId", restaurant_id)
        );
    }

    let mut lines = Vec::with_capacity(data.items.len());
    for requested in &data.items {
        let Some(item) = menu_item::find_by_id(pool, requested.menu_item_id).await? else {
            return Err(AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {} not found", requested.menu_item_id),
            )
            .with_detail("menuItemId", requested.menu_item_id));
        };
        if item.restaurant_id != restaurant_id {
            return Err(AppError::new(ErrorCode::MenuItemRestaurantMismatch)
                .with_detail("menuItemId", item.id)
                .with_detail("restaurantId", restaurant_id));
        }
        lines.push(OrderItem {
            menu_item_id: item.id,
            name: item.name,
            unit_price: item.price,
            quantity: requested.quantity,
        });
    }

    let total_price = money::order_total(lines.iter().map(|l| (l.unit_price, l.quantity)))
        .ok_or_else(|| AppError::validation("Order total is out of range"))?;

    let created = order::create(
        pool,
        NewOrder {
            restaurant_id,
            customer_name: data.customer_name.trim().to_string(),
            customer_contact: data.customer_contact.trim().to_string(),
            items: lines,
            total_price,
        },
    )
    .await?;

    tracing::info!(
        order_id = created.id,
        restaurant_id,
        total_price,
        lines = created.items.len(),
        "Order created"
    );
    Ok(created)
}

/// Orders of one restaurant, newest first
///
/// `None` and `"all"` list everything; a known status narrows the list; any
/// other filter text matches nothing and yields an empty list.
pub async fn list_orders(
    pool: &SqlitePool,
    restaurant_id: i64,
    filter: Option<&str>,
) -> Result<Vec<Order>, AppError> {
    let status = match filter.map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => match raw.parse::<OrderStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                tracing::debug!(filter = raw, "Unknown order filter, returning no orders");
                return Ok(Vec::new());
            }
        },
    };
    Ok(order::find_by_restaurant(pool, restaurant_id, status).await?)
}

/// One order, visible to its restaurant only
pub async fn get_order(
    pool: &SqlitePool,
    principal: &CurrentPrincipal,
    order_id: i64,
) -> Result<Order, AppError> {
    let found = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;
    ensure_owner(principal, found.restaurant_id)?;
    Ok(found)
}

/// Move an order to the status named by `raw`
pub async fn update_status(
    pool: &SqlitePool,
    policy: TransitionPolicy,
    principal: &CurrentPrincipal,
    order_id: i64,
    raw: &str,
) -> Result<Order, AppError> {
    let target = parse_status(raw)?;
    let current = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;
    ensure_owner(principal, current.restaurant_id)?;
    policy.check(current.status, target)?;

    if current.status == target {
        return Ok(current);
    }

    let updated = order::update_status(pool, order_id, target).await?;
    tracing::info!(
        order_id,
        from = %current.status,
        to = %target,
        "Order status changed"
    );
    Ok(updated)
}
