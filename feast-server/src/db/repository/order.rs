//! Order Repository
//!
//! Orders and their lines live in two tables; every read reassembles
//! [`Order`] with lines in their original position.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::SqlitePool;
use std::collections::HashMap;

const ORDER_SELECT: &str = "SELECT id, restaurant_id, customer_name, customer_contact, total_price, status, created_at, updated_at FROM orders";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    restaurant_id: i64,
    customer_name: String,
    customer_contact: String,
    total_price: f64,
    status: OrderStatus,
    created_at: i64,
    updated_at: i64,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            restaurant_id: self.restaurant_id,
            customer_name: self.customer_name,
            customer_contact: self.customer_contact,
            items,
            total_price: self.total_price,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_id: i64,
    menu_item_id: i64,
    name: String,
    unit_price: f64,
    quantity: i64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            menu_item_id: row.menu_item_id,
            name: row.name,
            unit_price: row.unit_price,
            quantity: row.quantity,
        }
    }
}

/// A priced order ready to persist
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub restaurant_id: i64,
    pub customer_name: String,
    pub customer_contact: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
}

/// Insert the order and its lines atomically; status starts at pending
pub async fn create(pool: &SqlitePool, data: NewOrder) -> RepoResult<Order> {
    if data.items.is_empty() {
        return Err(RepoError::Validation("order has no items".into()));
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO orders (id, restaurant_id, customer_name, customer_contact, total_price, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(&data.customer_name)
    .bind(&data.customer_contact)
    .bind(data.total_price)
    .bind(OrderStatus::Pending)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (position, item) in data.items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_item (order_id, position, menu_item_id, name, unit_price, quantity) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(id)
        .bind(position as i64)
        .bind(item.menu_item_id)
        .bind(&item.name)
        .bind(item.unit_price)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(Order {
        id,
        restaurant_id: data.restaurant_id,
        customer_name: data.customer_name,
        customer_contact: data.customer_contact,
        items: data.items,
        total_price: data.total_price,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let Some(row) = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };
    let items = sqlx::query_as::<_, OrderItemRow>(
        "SELECT order_id, menu_item_id, name, unit_price, quantity FROM order_item WHERE order_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(OrderItem::from)
    .collect();
    Ok(Some(row.into_order(items)))
}

/// Orders of one restaurant, newest first, optionally narrowed to a status
pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
    status: Option<OrderStatus>,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE restaurant_id = ?1 AND (?2 IS NULL OR status = ?2) ORDER BY created_at DESC, id DESC"
    );
    let rows = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(restaurant_id)
        .bind(status)
        .fetch_all(pool)
        .await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let item_rows = sqlx::query_as::<_, OrderItemRow>(
        "SELECT oi.order_id, oi.menu_item_id, oi.name, oi.unit_price, oi.quantity FROM order_item oi JOIN orders o ON o.id = oi.order_id WHERE o.restaurant_id = ?1 AND (?2 IS NULL OR o.status = ?2) ORDER BY oi.order_id, oi.position",
    )
    .bind(restaurant_id)
    .bind(status)
    .fetch_all(pool)
    .await?;

    let mut lines: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for row in item_rows {
        lines.entry(row.order_id).or_default().push(row.into());
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            let items = lines.remove(&row.id).unwrap_or_default();
            row.into_order(items)
        })
        .collect())
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
