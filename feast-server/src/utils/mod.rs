//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] - unified error and response (from shared::error)
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - input checks shared by handlers

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
