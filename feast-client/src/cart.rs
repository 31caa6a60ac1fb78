//! Cart
//!
//! Client-local order draft. A cart holds lines of a single restaurant;
//! adding an item of another restaurant is refused rather than silently
//! starting over.

use rust_decimal::prelude::*;
use shared::models::{MenuItem, OrderCreate, OrderItemInput};
use thiserror::Error;

/// Per-line quantity ceiling, matching what the server accepts
pub const MAX_LINE_QUANTITY: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Cart holds items of restaurant {current}, cannot add from {requested}")]
    RestaurantMismatch { current: i64, requested: i64 },

    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("Menu item {0} is not in the cart")]
    NotInCart(i64),

    #[error("Cart is empty")]
    Empty,
}

/// One cart line; name and price are what the customer saw when adding
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub menu_item_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    restaurant_id: Option<i64>,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restaurant_id(&self) -> Option<i64> {
        self.restaurant_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add `quantity` of `item`, merging with an existing line
    ///
    /// Line quantities are capped at [`MAX_LINE_QUANTITY`].
    pub fn add(&mut self, item: &MenuItem, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if let Some(current) = self.restaurant_id
            && current != item.restaurant_id
        {
            return Err(CartError::RestaurantMismatch {
                current,
                requested: item.restaurant_id,
            });
        }

        self.restaurant_id = Some(item.restaurant_id);
        match self.lines.iter_mut().find(|l| l.menu_item_id == item.id) {
            Some(line) => line.quantity = capped(line.quantity.saturating_add(quantity)),
            None => self.lines.push(CartLine {
                menu_item_id: item.id,
                name: item.name.clone(),
                unit_price: item.price,
                quantity: capped(quantity),
            }),
        }
        Ok(())
    }

    /// Drop a line; the cart forgets its restaurant once empty
    pub fn remove(&mut self, menu_item_id: i64) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|l| l.menu_item_id != menu_item_id);
        if self.lines.len() == before {
            return Err(CartError::NotInCart(menu_item_id));
        }
        if self.lines.is_empty() {
            self.restaurant_id = None;
        }
        Ok(())
    }

    /// Stops at [`MAX_LINE_QUANTITY`]
    pub fn increase(&mut self, menu_item_id: i64) -> Result<(), CartError> {
        let line = self.line_mut(menu_item_id)?;
        line.quantity = capped(line.quantity.saturating_add(1));
        Ok(())
    }

    /// Never goes below 1; use [`Cart::remove`] to drop a line
    pub fn decrease(&mut self, menu_item_id: i64) -> Result<(), CartError> {
        let line = self.line_mut(menu_item_id)?;
        line.quantity = (line.quantity - 1).max(1);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.restaurant_id = None;
    }

    /// Display total from the prices captured when adding
    ///
    /// The server recomputes the real total from current menu prices.
    pub fn total(&self) -> f64 {
        let total: Decimal = self
            .lines
            .iter()
            .map(|l| {
                Decimal::from_f64(l.unit_price)
                    .unwrap_or_default()
                    .saturating_mul(Decimal::from(l.quantity))
            })
            .fold(Decimal::ZERO, Decimal::saturating_add);
        total
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_default()
    }

    /// Build the create-order request for this cart
    pub fn to_order(
        &self,
        customer_name: impl Into<String>,
        customer_contact: impl Into<String>,
    ) -> Result<OrderCreate, CartError> {
        let Some(restaurant_id) = self.restaurant_id.filter(|_| !self.is_empty()) else {
            return Err(CartError::Empty);
        };
        Ok(OrderCreate {
            restaurant_id: Some(restaurant_id),
            customer_name: customer_name.into(),
            customer_contact: customer_contact.into(),
            items: self
                .lines
                .iter()
                .map(|l| OrderItemInput {
                    menu_item_id: l.menu_item_id,
                    quantity: l.quantity,
                })
                .collect(),
        })
    }

    fn line_mut(&mut self, menu_item_id: i64) -> Result<&mut CartLine, CartError> {
        self.lines
            .iter_mut()
            .find(|l| l.menu_item_id == menu_item_id)
            .ok_or(CartError::NotInCart(menu_item_id))
    }
}

fn capped(quantity: i64) -> i64 {
    quantity.min(MAX_LINE_QUANTITY)
}
