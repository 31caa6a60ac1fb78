//! Restaurant Repository

use super::{Credentials, RepoError, RepoResult};
use shared::models::{DEFAULT_PROFILE_IMAGE, Restaurant, RestaurantCreate, RestaurantUpdate};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str = "SELECT id, username, restaurant_name, contact_number, email, location, delivery_range, open_time, close_time, open_close_status, ratings, reviews, profile_image, created_at, updated_at FROM restaurant";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All restaurants by name; `open_only` keeps those currently open
pub async fn find_all(pool: &SqlitePool, open_only: bool) -> RepoResult<Vec<Restaurant>> {
    let sql = if open_only {
        format!("{RESTAURANT_SELECT} WHERE open_close_status = 1 ORDER BY restaurant_name")
    } else {
        format!("{RESTAURANT_SELECT} ORDER BY restaurant_name")
    };
    let rows = sqlx::query_as::<_, Restaurant>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_credentials(pool: &SqlitePool, username: &str) -> RepoResult<Option<Credentials>> {
    let row = sqlx::query_as::<_, Credentials>(
        "SELECT id, password_hash FROM restaurant WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Whether `username` is taken by a restaurant other than `exclude_id`
pub async fn username_taken(
    pool: &SqlitePool,
    username: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM restaurant WHERE username = ?1 AND (?2 IS NULL OR id != ?2) LIMIT 1",
    )
    .bind(username)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

/// Whether `email` is taken by a restaurant other than `exclude_id`
pub async fn email_taken(
    pool: &SqlitePool,
    email: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM restaurant WHERE email = ?1 AND (?2 IS NULL OR id != ?2) LIMIT 1",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

pub async fn create(
    pool: &SqlitePool,
    data: &RestaurantCreate,
    password_hash: &str,
) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let profile_image = data
        .profile_image
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_PROFILE_IMAGE);
    sqlx::query(
        "INSERT INTO restaurant (id, username, password_hash, restaurant_name, contact_number, email, location, delivery_range, open_time, close_time, open_close_status, ratings, reviews, profile_image, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, 0, '[]', ?11, ?12, ?12)",
    )
    .bind(id)
    .bind(data.username.trim())
    .bind(password_hash)
    .bind(data.restaurant_name.trim())
    .bind(data.contact_number.trim())
    .bind(data.email.trim())
    .bind(&data.location)
    .bind(data.delivery_range)
    .bind(&data.open_time)
    .bind(&data.close_time)
    .bind(profile_image)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

/// Overwrite every field present in `data`
pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let reviews = data
        .reviews
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| RepoError::Validation(format!("reviews: {e}")))?;
    let rows = sqlx::query(
        "UPDATE restaurant SET username = COALESCE(?1, username), restaurant_name = COALESCE(?2, restaurant_name), contact_number = COALESCE(?3, contact_number), email = COALESCE(?4, email), location = COALESCE(?5, location), delivery_range = COALESCE(?6, delivery_range), open_time = COALESCE(?7, open_time), close_time = COALESCE(?8, close_time), open_close_status = COALESCE(?9, open_close_status), ratings = COALESCE(?10, ratings), reviews = COALESCE(?11, reviews), profile_image = COALESCE(?12, profile_image), updated_at = ?13 WHERE id = ?14",
    )
    .bind(data.username.as_deref().map(str::trim))
    .bind(data.restaurant_name.as_deref().map(str::trim))
    .bind(data.contact_number.as_deref().map(str::trim))
    .bind(data.email.as_deref().map(str::trim))
    .bind(data.location)
    .bind(data.delivery_range)
    .bind(data.open_time)
    .bind(data.close_time)
    .bind(data.open_close_status)
    .bind(data.ratings)
    .bind(reviews)
    .bind(data.profile_image)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Flip the open/closed flag; independent of open/close times
pub async fn set_open_status(pool: &SqlitePool, id: i64, is_open: bool) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE restaurant SET open_close_status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(is_open)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::fixtures::registration;

    #[tokio::test]
    async fn create_applies_defaults() {
        let db = DbService::in_memory().await.unwrap();
        let r = create(&db.pool, &registration("cafe1", "cafe1@example.com"), "hash")
            .await
            .unwrap();
        assert!(r.open_close_status);
        assert_eq!(r.ratings, 0.0);
        assert!(r.reviews.is_empty());
        assert_eq!(r.profile_image, DEFAULT_PROFILE_IMAGE);

        let creds = find_credentials(&db.pool, "cafe1").await.unwrap().unwrap();
        assert_eq!(creds.id, r.id);
        assert_eq!(creds.password_hash, "hash");
    }

    #[tokio::test]
    async fn unique_columns_are_enforced() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, &registration("cafe1", "a@example.com"), "h")
            .await
            .unwrap();

        assert!(username_taken(&db.pool, "cafe1", None).await.unwrap());
        assert!(email_taken(&db.pool, "a@example.com", None).await.unwrap());

        let err = create(&db.pool, &registration("cafe2", "a@example.com"), "h")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref m) if m.ends_with(".email")));
    }

    #[tokio::test]
    async fn update_overwrites_present_fields_only() {
        let db = DbService::in_memory().await.unwrap();
        let r = create(&db.pool, &registration("cafe1", "a@example.com"), "h")
            .await
            .unwrap();

        let updated = update(
            &db.pool,
            r.id,
            RestaurantUpdate {
                location: Some("Harbour 9".into()),
                reviews: Some(vec!["great tea".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.location, "Harbour 9");
        assert_eq!(updated.reviews, vec!["great tea".to_string()]);
        assert_eq!(updated.restaurant_name, r.restaurant_name);

        let closed = set_open_status(&db.pool, r.id, false).await.unwrap();
        assert!(!closed.open_close_status);
        assert_eq!(find_all(&db.pool, true).await.unwrap().len(), 0);
        assert_eq!(find_all(&db.pool, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_restaurant_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        let err = set_open_status(&db.pool, 42, true).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
