//! Client-related types shared between server and client
//!
//! Request/response bodies of the auth and health endpoints. Resource
//! payloads live in [`crate::models`].

use crate::models::{Customer, CustomerSummary, Restaurant, RestaurantSummary};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export ApiResponse from error module
pub use crate::error::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request (both principal kinds)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Restaurant login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantLoginResponse {
    pub token: String,
    pub restaurant: RestaurantSummary,
}

/// Customer login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerLoginResponse {
    pub token: String,
    pub user: CustomerSummary,
}

/// `GET /api/auth/me` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurrentPrincipalResponse {
    Restaurant { restaurant: Restaurant },
    Customer { user: Customer },
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub name: String,
    pub version: String,
    /// `"ok"` or `"unavailable"`
    pub database: String,
}
