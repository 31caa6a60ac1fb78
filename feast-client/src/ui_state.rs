//! Ephemeral UI state
//!
//! Selections and drafts that never came from the server. Kept apart from
//! [`crate::cache`] so refetching never clobbers what the user is editing.

use shared::models::{MenuItemUpdate, OrderStatus};

#[derive(Debug, Clone)]
pub struct UiState {
    /// `"all"` or a status name
    pub order_filter: String,
    /// Restaurant the customer is browsing
    pub selected_restaurant: Option<i64>,
    pub show_open_only: bool,
    /// Menu item being edited and its unsaved changes
    pub menu_draft: Option<(i64, MenuItemUpdate)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            order_filter: "all".to_string(),
            selected_restaurant: None,
            show_open_only: false,
            menu_draft: None,
        }
    }
}

impl UiState {
    pub fn filter_by(&mut self, status: Option<OrderStatus>) {
        self.order_filter = status.map_or_else(|| "all".to_string(), |s| s.to_string());
    }

    pub fn start_editing(&mut self, menu_item_id: i64) {
        self.menu_draft = Some((menu_item_id, MenuItemUpdate::default()));
    }

    /// Take the draft for submission
    pub fn take_draft(&mut self) -> Option<(i64, MenuItemUpdate)> {
        self.menu_draft.take()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
