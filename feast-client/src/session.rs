//! Session
//!
//! Ties the HTTP client to the client-side stores and keeps them
//! consistent across mutations and logout.

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, Order, Restaurant};

use crate::{Cart, ClientConfig, ClientResult, HttpClient, RestaurantCache, UiState};

#[derive(Debug)]
pub struct Session {
    pub http: HttpClient,
    pub cache: RestaurantCache,
    pub cart: Cart,
    pub ui: UiState,
}

impl Session {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_client(config.build_http_client()?))
    }

    pub fn with_client(http: HttpClient) -> Self {
        Self {
            http,
            cache: RestaurantCache::new(),
            cart: Cart::new(),
            ui: UiState::default(),
        }
    }

    /// Place the cart as an order; the cart is emptied only on success
    pub async fn checkout(
        &mut self,
        customer_name: &str,
        customer_contact: &str,
    ) -> ClientResult<Order> {
        let request = self.cart.to_order(customer_name, customer_contact)?;
        let order = self.http.create_order(&request).await?;
        self.cart.clear();
        tracing::info!(order_id = order.id, total = order.total_price, "Order placed");
        Ok(order)
    }

    pub async fn add_menu_item(&mut self, data: &MenuItemCreate) -> ClientResult<MenuItem> {
        let item = self.http.create_menu_item(data).await?;
        self.cache.menu_item_added(item.clone());
        Ok(item)
    }

    pub async fn update_menu_item(&mut self, id: i64, data: &MenuItemUpdate) -> ClientResult<MenuItem> {
        let item = self.http.update_menu_item(id, data).await?;
        self.cache.menu_item_updated(item.clone());
        Ok(item)
    }

    /// Submit the menu draft held in the UI state, if any
    pub async fn save_menu_draft(&mut self) -> ClientResult<Option<MenuItem>> {
        let Some((id, draft)) = self.ui.take_draft() else {
            return Ok(None);
        };
        self.update_menu_item(id, &draft).await.map(Some)
    }

    pub async fn delete_menu_item(&mut self, id: i64) -> ClientResult<()> {
        self.http.delete_menu_item(id).await?;
        self.cache.menu_item_removed(id);
        Ok(())
    }

    pub async fn set_open_status(&mut self, open: bool) -> ClientResult<Restaurant> {
        let restaurant = self.http.set_open_status(open).await?;
        self.cache.profile_updated(restaurant.clone());
        Ok(restaurant)
    }

    pub async fn update_order_status(&mut self, id: i64, status: &str) -> ClientResult<Order> {
        let order = self.http.update_order_status(id, status).await?;
        self.cache.order_updated(order.clone());
        Ok(order)
    }

    /// Refresh orders with the filter currently selected in the UI
    pub async fn poll_orders(&mut self) -> ClientResult<()> {
        let filter = self.ui.order_filter.clone();
        self.cache.refresh_orders(&self.http, &filter).await
    }

    /// Forget the token and every client-side store
    pub async fn logout(&mut self) {
        self.http.logout().await;
        self.cache.clear();
        self.cart.clear();
        self.ui.reset();
    }
}
