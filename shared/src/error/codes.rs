//! Unified error codes for the Feast marketplace
//!
//! This module defines all error codes used across feast-server and feast-client.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors (restaurant / customer identities)
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Principal is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Token belongs to a principal that no longer exists
    PrincipalNotFound = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Restaurant account required
    RestaurantRequired = 2002,
    /// Resource is owned by another restaurant
    NotResourceOwner = 2003,

    // ==================== 3xxx: Account ====================
    /// Username already taken
    UsernameExists = 3001,
    /// Email already taken
    EmailExists = 3002,
    /// Restaurant not found
    RestaurantNotFound = 3003,
    /// Customer not found
    CustomerNotFound = 3004,
    /// Password too short
    PasswordTooShort = 3005,
    /// Field cannot be changed through this endpoint
    FieldNotEditable = 3006,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Unknown order status value
    InvalidOrderStatus = 4003,
    /// Status change rejected by the transition table
    OrderTransitionDenied = 4004,
    /// Item quantity must be positive and within the per-line limit
    InvalidQuantity = 4005,
    /// Too many lines in one order
    OrderTooLarge = 4006,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6002,
    /// Menu item belongs to another restaurant
    MenuItemRestaurantMismatch = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error
    NetworkError = 9101,
    /// Timeout error
    TimeoutError = 9102,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Access denied. No token provided",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::PrincipalNotFound => "Account for this token no longer exists",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RestaurantRequired => "Restaurant account is required",
            ErrorCode::NotResourceOwner => "Resource belongs to another restaurant",

            // Account
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::EmailExists => "Email already exists",
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::PasswordTooShort => "Password is too short",
            ErrorCode::FieldNotEditable => "Field cannot be changed here",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::InvalidOrderStatus => "Invalid status",
            ErrorCode::OrderTransitionDenied => "Order status transition is not allowed",
            ErrorCode::InvalidQuantity => "Quantity must be between 1 and 1000",
            ErrorCode::OrderTooLarge => "Order has too many items",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Price must be a non-negative number",
            ErrorCode::MenuItemRestaurantMismatch => "Menu item belongs to another restaurant",

            // System
            ErrorCode::InternalError => "Server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::PrincipalNotFound),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RestaurantRequired),
            2003 => Ok(ErrorCode::NotResourceOwner),

            // Account
            3001 => Ok(ErrorCode::UsernameExists),
            3002 => Ok(ErrorCode::EmailExists),
            3003 => Ok(ErrorCode::RestaurantNotFound),
            3004 => Ok(ErrorCode::CustomerNotFound),
            3005 => Ok(ErrorCode::PasswordTooShort),
            3006 => Ok(ErrorCode::FieldNotEditable),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::InvalidOrderStatus),
            4004 => Ok(ErrorCode::OrderTransitionDenied),
            4005 => Ok(ErrorCode::InvalidQuantity),
            4006 => Ok(ErrorCode::OrderTooLarge),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),
            6003 => Ok(ErrorCode::MenuItemRestaurantMismatch),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::NetworkError),
            9102 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::RequiredField,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::PrincipalNotFound,
        ErrorCode::PermissionDenied,
        ErrorCode::RestaurantRequired,
        ErrorCode::NotResourceOwner,
        ErrorCode::UsernameExists,
        ErrorCode::EmailExists,
        ErrorCode::RestaurantNotFound,
        ErrorCode::CustomerNotFound,
        ErrorCode::PasswordTooShort,
        ErrorCode::FieldNotEditable,
        ErrorCode::OrderNotFound,
        ErrorCode::OrderEmpty,
        ErrorCode::InvalidOrderStatus,
        ErrorCode::OrderTransitionDenied,
        ErrorCode::InvalidQuantity,
        ErrorCode::OrderTooLarge,
        ErrorCode::MenuItemNotFound,
        ErrorCode::MenuItemInvalidPrice,
        ErrorCode::MenuItemRestaurantMismatch,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::ConfigError,
        ErrorCode::NetworkError,
        ErrorCode::TimeoutError,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::NotResourceOwner.code(), 2003);
        assert_eq!(ErrorCode::UsernameExists.code(), 3001);
        assert_eq!(ErrorCode::InvalidOrderStatus.code(), 4003);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_every_code_roundtrips_through_u16() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(
            InvalidErrorCode(42).to_string(),
            "invalid error code: 42"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let parsed: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(parsed, ErrorCode::UsernameExists);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }
}
