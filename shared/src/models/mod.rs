//! Data models
//!
//! Shared between feast-server and feast-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps are UTC milliseconds.
//! Wire format is camelCase.

pub mod customer;
pub mod menu_item;
pub mod order;
pub mod restaurant;

// Re-exports
pub use customer::*;
pub use menu_item::*;
pub use order::*;
pub use restaurant::*;
