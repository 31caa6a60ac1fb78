//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Order status
///
/// Stored and serialized in snake_case. `"out for delivery"` is accepted
/// on input for compatibility with older clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "TEXT", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    #[serde(alias = "out for delivery")]
    OutForDelivery,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// No transition leaves a terminal status
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::OutForDelivery | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized status text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrderStatus(pub String);

impl fmt::Display for UnknownOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownOrderStatus {}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "out_for_delivery" | "out for delivery" => Ok(OrderStatus::OutForDelivery),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order line captured at creation time
///
/// `menu_item_id` is a plain reference; the menu item may be deleted later
/// while `name` and `unit_price` keep the order readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

/// Order entity with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub restaurant_id: i64,
    pub customer_name: String,
    pub customer_contact: String,
    pub items: Vec<OrderItem>,
    /// Frozen at creation from then-current menu prices
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Requested line of a new order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    #[serde(alias = "menuItem")]
    pub menu_item_id: i64,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i64,
}

/// Create order payload
///
/// `restaurant_id` may be omitted when a restaurant places the order for
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(default, alias = "restaurant")]
    pub restaurant_id: Option<i64>,
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 50))]
    pub customer_contact: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100), nested)]
    pub items: Vec<OrderItemInput>,
}

/// Status change payload
///
/// Kept as raw text so an unknown value surfaces as an order-status
/// error instead of a JSON rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}

/// `?filter=` query for order listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderListQuery {
    pub filter: Option<String>,
}

/// `{ orders: [...] }` list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_canonical_and_legacy_spelling() {
        assert_eq!("ready".parse::<OrderStatus>(), Ok(OrderStatus::Ready));
        assert_eq!(
            "out for delivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert_eq!(
            "completed".parse::<OrderStatus>(),
            Err(UnknownOrderStatus("completed".into()))
        );
    }

    #[test]
    fn status_serde_uses_snake_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        let parsed: OrderStatus = serde_json::from_str("\"out for delivery\"").unwrap();
        assert_eq!(parsed, OrderStatus::OutForDelivery);
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn terminal_statuses() {
        let terminal: Vec<_> = OrderStatus::ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![&OrderStatus::OutForDelivery, &OrderStatus::Cancelled]
        );
    }

    #[test]
    fn create_payload_validates_items() {
        let data: OrderCreate = serde_json::from_str(
            r#"{"customerName":"Ann","customerContact":"555","items":[]}"#,
        )
        .unwrap();
        assert!(data.validate().is_err());

        let data: OrderCreate = serde_json::from_str(
            r#"{"restaurant":7,"customerName":"Ann","customerContact":"555","items":[{"menuItem":1,"quantity":0}]}"#,
        )
        .unwrap();
        assert_eq!(data.restaurant_id, Some(7));
        assert!(data.validate().is_err());
    }
}
