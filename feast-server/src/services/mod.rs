//! Service layer
//!
//! - [`menu`] - Menu Repository rules (ownership, price checks)
//! - [`profile`] - Restaurant Profile Store rules

pub mod menu;
pub mod profile;
