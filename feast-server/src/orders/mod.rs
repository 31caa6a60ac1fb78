//! Order Engine
//!
//! - [`engine`] - create, list, read and transition orders
//! - [`status`] - transition table and policies
//! - [`money`] - decimal price arithmetic

pub mod engine;
pub mod money;
pub mod status;

pub use status::{TransitionPolicy, parse_status};
