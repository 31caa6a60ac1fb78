//! Repository Module
//!
//! Free async functions per table over a `&SqlitePool`. Handlers convert
//! [`RepoError`] into `AppError` at the edge.

pub mod customer;
pub mod menu_item;
pub mod order;
pub mod restaurant;

#[cfg(test)]
pub(crate) mod fixtures;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            // SQLite reports "UNIQUE constraint failed: <table>.<column>"
            RepoError::Duplicate(msg) if msg.ends_with(".email") => {
                AppError::new(ErrorCode::EmailExists)
            }
            RepoError::Duplicate(msg) if msg.ends_with(".username") => {
                AppError::new(ErrorCode::UsernameExists)
            }
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Login material for either principal kind; never leaves the server
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id: i64,
    pub password_hash: String,
}
