//! Feast Client - client state layer for the Feast marketplace API
//!
//! Fetched server data ([`cache`]) and ephemeral UI state ([`ui_state`])
//! live in separate stores; the [`cart`] never touches the network until it
//! is turned into an order.

pub mod cache;
pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod token;
pub mod ui_state;

pub use cache::{RestaurantCache, Resource};
pub use cart::{Cart, CartError, CartLine};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::Session;
pub use ui_state::UiState;

// Re-export shared types for convenience
pub use shared::client::{
    ApiResponse, CurrentPrincipalResponse, CustomerLoginResponse, HealthResponse,
    RestaurantLoginResponse,
};
