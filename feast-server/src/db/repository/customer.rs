//! Customer Repository

use super::{Credentials, RepoError, RepoResult};
use shared::models::{Customer, CustomerCreate};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str =
    "SELECT id, username, email, first_name, last_name, created_at FROM customer";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_credentials(pool: &SqlitePool, username: &str) -> RepoResult<Option<Credentials>> {
    let row = sqlx::query_as::<_, Credentials>(
        "SELECT id, password_hash FROM customer WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn username_taken(pool: &SqlitePool, username: &str) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM customer WHERE username = ? LIMIT 1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn create(
    pool: &SqlitePool,
    data: &CustomerCreate,
    password_hash: &str,
) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO customer (id, username, password_hash, email, first_name, last_name, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(data.username.trim())
    .bind(password_hash)
    .bind(data.email.trim())
    .bind(data.first_name.trim())
    .bind(data.last_name.trim())
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn signup(username: &str) -> CustomerCreate {
        CustomerCreate {
            username: username.into(),
            password: "pw12345678".into(),
            email: "same@example.com".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
        }
    }

    #[tokio::test]
    async fn customers_may_share_an_email_but_not_a_username() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, &signup("ann"), "h").await.unwrap();
        create(&db.pool, &signup("bob"), "h").await.unwrap();

        assert!(username_taken(&db.pool, "ann").await.unwrap());
        let err = create(&db.pool, &signup("ann"), "h").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
