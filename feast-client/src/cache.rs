//! Server-data cache for the restaurant dashboard
//!
//! Each collection tracks its own loading and error state. Mutations that
//! succeed on the server patch the cached data in place instead of
//! refetching; [`RestaurantCache::clear`] resets everything on logout.

use shared::models::{MenuItem, Order, Restaurant};

use crate::{ClientResult, HttpClient};

/// One fetched value with its request state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Resource<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self, data: T) {
        self.data = data;
        self.loading = false;
        self.error = None;
    }

    /// Keep stale data, record the failure
    pub fn fail(&mut self, error: impl ToString) {
        self.loading = false;
        self.error = Some(error.to_string());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn settle(&mut self, result: ClientResult<T>) -> ClientResult<()> {
        match result {
            Ok(data) => {
                self.finish(data);
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantCache {
    pub profile: Resource<Option<Restaurant>>,
    pub menu: Resource<Vec<MenuItem>>,
    pub orders: Resource<Vec<Order>>,
}

impl RestaurantCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh_profile(&mut self, http: &HttpClient) -> ClientResult<()> {
        self.profile.begin();
        let result = http.profile().await.map(Some);
        self.profile.settle(result)
    }

    pub async fn refresh_menu(&mut self, http: &HttpClient) -> ClientResult<()> {
        self.menu.begin();
        let result = http.menu().await;
        self.menu.settle(result)
    }

    /// Poll target for the dashboard timer
    pub async fn refresh_orders(&mut self, http: &HttpClient, filter: &str) -> ClientResult<()> {
        self.orders.begin();
        let result = http.orders(filter).await;
        self.orders.settle(result)
    }

    pub fn menu_item_added(&mut self, item: MenuItem) {
        self.menu.data.push(item);
    }

    pub fn menu_item_updated(&mut self, item: MenuItem) {
        if let Some(slot) = self.menu.data.iter_mut().find(|m| m.id == item.id) {
            *slot = item;
        }
    }

    pub fn menu_item_removed(&mut self, id: i64) {
        self.menu.data.retain(|m| m.id != id);
    }

    /// Profile returned by a status toggle or profile update
    pub fn profile_updated(&mut self, restaurant: Restaurant) {
        self.profile.data = Some(restaurant);
    }

    pub fn order_updated(&mut self, order: Order) {
        if let Some(slot) = self.orders.data.iter_mut().find(|o| o.id == order.id) {
            *slot = order;
        }
    }

    pub fn clear(&mut self) {
        self.profile.reset();
        self.menu.reset();
        self.orders.reset();
    }
}
