//! Menu Item Model

use crate::util::{lenient_f64, lenient_opt_f64};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity, owned by exactly one restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    /// Owning restaurant, fixed at creation
    pub restaurant_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub is_available: bool,
    pub rating: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(deserialize_with = "lenient_f64")]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default)]
    pub image: String,
    pub is_available: Option<bool>,
}

/// Update menu item payload
///
/// There is no `restaurant_id` here: ownership never moves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// `{ menuItems: [...] }` list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemList {
    pub menu_items: Vec<MenuItem>,
}
