//! Credential Store
//!
//! Registration and password checks for both principal kinds. Payloads
//! arrive already validated; plaintext passwords never reach the database.

use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, CustomerCreate, Restaurant, RestaurantCreate};
use sqlx::SqlitePool;

use crate::auth::password::{hash_password, verify_password};
use crate::db::repository::{customer, restaurant};
use crate::security_log;

/// Argon2 off the async workers
async fn hash(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking join error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

async fn password_matches(password: &str, password_hash: String) -> Result<bool, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking join error: {e}");
            AppError::new(ErrorCode::InternalError)
        })
}

/// Store a new restaurant; username and email must both be unused
pub async fn register_restaurant(
    pool: &SqlitePool,
    data: &RestaurantCreate,
) -> Result<Restaurant, AppError> {
    if restaurant::username_taken(pool, data.username.trim(), None).await? {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }
    if restaurant::email_taken(pool, data.email.trim(), None).await? {
        return Err(AppError::new(ErrorCode::EmailExists));
    }
    let password_hash = hash(&data.password).await?;
    // the UNIQUE indexes still catch a concurrent registration
    let created = restaurant::create(pool, data, &password_hash).await?;
    tracing::info!(restaurant_id = created.id, username = %created.username, "Restaurant registered");
    Ok(created)
}

/// Store a new customer; only the username must be unused
pub async fn register_customer(
    pool: &SqlitePool,
    data: &CustomerCreate,
) -> Result<Customer, AppError> {
    if customer::username_taken(pool, data.username.trim()).await? {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }
    let password_hash = hash(&data.password).await?;
    let created = customer::create(pool, data, &password_hash).await?;
    tracing::info!(customer_id = created.id, username = %created.username, "Customer registered");
    Ok(created)
}

/// Unknown username is 404, wrong password is 401
pub async fn verify_restaurant(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Restaurant, AppError> {
    let Some(creds) = restaurant::find_credentials(pool, username.trim()).await? else {
        security_log!("WARN", "login_unknown_user", kind = "restaurant", username = username);
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    };
    if !password_matches(password, creds.password_hash).await? {
        security_log!("WARN", "login_bad_password", kind = "restaurant", username = username);
        return Err(AppError::invalid_credentials());
    }
    restaurant::find_by_id(pool, creds.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))
}

/// Unknown username is 404, wrong password is 401
pub async fn verify_customer(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Customer, AppError> {
    let Some(creds) = customer::find_credentials(pool, username.trim()).await? else {
        security_log!("WARN", "login_unknown_user", kind = "customer", username = username);
        return Err(AppError::new(ErrorCode::CustomerNotFound));
    };
    if !password_matches(password, creds.password_hash).await? {
        security_log!("WARN", "login_bad_password", kind = "customer", username = username);
        return Err(AppError::invalid_credentials());
    }
    customer::find_by_id(pool, creds.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::fixtures::registration;

    fn signup(username: &str) -> CustomerCreate {
        CustomerCreate {
            username: username.into(),
            password: "pw12345678".into(),
            email: format!("{username}@example.com"),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_restaurant_username_leaves_count_unchanged() {
        let db = DbService::in_memory().await.unwrap();
        register_restaurant(&db.pool, &registration("cafe1", "a@example.com"))
            .await
            .unwrap();

        let err = register_restaurant(&db.pool, &registration("cafe1", "b@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameExists);

        let err = register_restaurant(&db.pool, &registration("cafe2", "a@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailExists);

        assert_eq!(restaurant::find_all(&db.pool, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn restaurant_login_checks_username_then_password() {
        let db = DbService::in_memory().await.unwrap();
        let created = register_restaurant(&db.pool, &registration("cafe1", "a@example.com"))
            .await
            .unwrap();

        let found = verify_restaurant(&db.pool, "cafe1", "pw12345678").await.unwrap();
        assert_eq!(found.id, created.id);

        let err = verify_restaurant(&db.pool, "cafe1", "wrong-password")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        let err = verify_restaurant(&db.pool, "nobody", "pw12345678")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }

    #[tokio::test]
    async fn customer_register_and_login() {
        let db = DbService::in_memory().await.unwrap();
        let created = register_customer(&db.pool, &signup("ann")).await.unwrap();

        let err = register_customer(&db.pool, &signup("ann")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameExists);

        let found = verify_customer(&db.pool, "ann", "pw12345678").await.unwrap();
        assert_eq!(found, created);
        assert_eq!(
            verify_customer(&db.pool, "ann", "nope").await.unwrap_err().code,
            ErrorCode::InvalidCredentials
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn hashing_round_trips_through_the_blocking_pool() {
        let stored = hash("pw12345678").await.unwrap();
        assert_ne!(stored, "pw12345678");
        assert!(password_matches("pw12345678", stored.clone()).await.unwrap());
        assert!(!password_matches("pw87654321", stored).await.unwrap());
    }
}
