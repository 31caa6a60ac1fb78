//! HTTP client for the Feast REST API

use std::sync::Arc;
use std::time::Duration;

use ::http::StatusCode;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::token;
use crate::{
    ApiResponse, ClientConfig, ClientError, ClientResult, CurrentPrincipalResponse,
    CustomerLoginResponse, HealthResponse, RestaurantLoginResponse,
};
use shared::client::LoginRequest;
use shared::models::{
    CustomerCreate, CustomerSummary, MenuItem, MenuItemCreate, MenuItemList, MenuItemUpdate,
    Order, OrderCreate, OrderList, OrderStatusUpdate, Restaurant, RestaurantCreate,
    RestaurantStatusUpdate, RestaurantSummary, RestaurantUpdate,
};

/// HTTP client holding the bearer token of the logged-in principal
///
/// Clones share the token. A 401 from the server, or a locally expired
/// token, drops it.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    /// Whether a stored token exists and has not expired locally
    pub async fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .await
            .as_deref()
            .is_some_and(|t| !token::is_expired(t))
    }

    /// Bearer header value, dropping a token that has already expired
    async fn auth_header(&self) -> Option<String> {
        let mut guard = self.token.write().await;
        if guard.as_deref().is_some_and(token::is_expired) {
            tracing::debug!("Stored token expired, dropping it");
            *guard = None;
        }
        guard.as_ref().map(|t| format!("Bearer {t}"))
    }

    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(auth) = self.auth_header().await {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Unwrap the `data` of an API envelope
    async fn call<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request::<ApiResponse<T>, B>(method, path, body)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing data for {path}")))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiResponse<()>>(&text)
                .map(|r| r.message)
                .unwrap_or(text);
            if status == StatusCode::UNAUTHORIZED {
                self.clear_token().await;
            }
            return Err(error_for_status(status, message));
        }

        response.json().await.map_err(Into::into)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.call(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.request::<ApiResponse<()>, ()>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    // ========== Auth API ==========

    pub async fn register_customer(&self, data: &CustomerCreate) -> ClientResult<CustomerSummary> {
        self.post("/api/auth/register", data).await
    }

    /// Log in a customer and keep the token
    pub async fn login_customer(
        &self,
        username: &str,
        password: &str,
    ) -> ClientResult<CustomerLoginResponse> {
        let login: CustomerLoginResponse = self
            .post("/api/auth/login", &credentials(username, password))
            .await?;
        self.set_token(login.token.clone()).await;
        Ok(login)
    }

    pub async fn register_restaurant(
        &self,
        data: &RestaurantCreate,
    ) -> ClientResult<RestaurantSummary> {
        self.post("/api/auth/restaurantRegister", data).await
    }

    /// Log in a restaurant and keep the token
    pub async fn login_restaurant(
        &self,
        username: &str,
        password: &str,
    ) -> ClientResult<RestaurantLoginResponse> {
        let login: RestaurantLoginResponse = self
            .post("/api/auth/restaurantLogin", &credentials(username, password))
            .await?;
        self.set_token(login.token.clone()).await;
        Ok(login)
    }

    pub async fn me(&self) -> ClientResult<CurrentPrincipalResponse> {
        self.get("/api/auth/me").await
    }

    /// Tokens are stateless; logging out only forgets it
    pub async fn logout(&self) {
        self.clear_token().await;
    }

    // ========== Restaurant self-service ==========

    pub async fn profile(&self) -> ClientResult<Restaurant> {
        self.get("/api/restaurant/profile").await
    }

    pub async fn update_profile(&self, data: &RestaurantUpdate) -> ClientResult<Restaurant> {
        self.put("/api/restaurant/profile", data).await
    }

    pub async fn set_open_status(&self, open: bool) -> ClientResult<Restaurant> {
        let body = RestaurantStatusUpdate {
            open_close_status: open,
        };
        self.put("/api/restaurant/status", &body).await
    }

    pub async fn menu(&self) -> ClientResult<Vec<MenuItem>> {
        let list: MenuItemList = self.get("/api/restaurant/menu").await?;
        Ok(list.menu_items)
    }

    pub async fn create_menu_item(&self, data: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.post("/api/restaurant/menu", data).await
    }

    pub async fn update_menu_item(&self, id: i64, data: &MenuItemUpdate) -> ClientResult<MenuItem> {
        self.put(&format!("/api/restaurant/menu/{id}"), data).await
    }

    pub async fn delete_menu_item(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/api/restaurant/menu/{id}")).await
    }

    // ========== Public browsing ==========

    pub async fn restaurants(&self, open_only: bool) -> ClientResult<Vec<Restaurant>> {
        if open_only {
            self.get("/api/restaurants?open=true").await
        } else {
            self.get("/api/restaurants").await
        }
    }

    pub async fn restaurant(&self, id: i64) -> ClientResult<Restaurant> {
        self.get(&format!("/api/restaurants/{id}")).await
    }

    pub async fn restaurant_menu(&self, id: i64) -> ClientResult<Vec<MenuItem>> {
        let list: MenuItemList = self.get(&format!("/api/restaurants/{id}/menu")).await?;
        Ok(list.menu_items)
    }

    // ========== Orders ==========

    /// `filter` is a status name or `"all"`
    pub async fn orders(&self, filter: &str) -> ClientResult<Vec<Order>> {
        let list: OrderList = self.get(&format!("/api/order?filter={filter}")).await?;
        Ok(list.orders)
    }

    pub async fn create_order(&self, data: &OrderCreate) -> ClientResult<Order> {
        self.post("/api/order", data).await
    }

    pub async fn order(&self, id: i64) -> ClientResult<Order> {
        self.get(&format!("/api/order/{id}")).await
    }

    pub async fn update_order_status(&self, id: i64, status: &str) -> ClientResult<Order> {
        let body = OrderStatusUpdate {
            status: status.to_string(),
        };
        self.put(&format!("/api/order/{id}/status"), &body).await
    }

    // ========== Health ==========

    /// `/health` is not wrapped in the API envelope
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.request::<HealthResponse, ()>(Method::GET, "/health", None)
            .await
    }
}

/// Map a non-success status to the matching client error
fn error_for_status(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        _ => ClientError::Internal(message),
    }
}

fn credentials(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_client_errors() {
        let msg = || "nope".to_string();
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, msg()),
            ClientError::Unauthorized(m) if m == "nope"
        ));
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN, msg()),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::NOT_FOUND, msg()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::CONFLICT, msg()),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::BAD_REQUEST, msg()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::SERVICE_UNAVAILABLE, msg()),
            ClientError::Internal(_)
        ));
    }
}
