//! Restaurant Profile Service

use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::{Restaurant, RestaurantUpdate};
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, restaurant};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_URL_LEN, reject_locked_fields, validate_optional_text, validate_payload,
};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::RestaurantNotFound, format!("Restaurant {id} not found"))
        .with_detail("restaurantId", id)
}

fn map_missing(id: i64) -> impl FnOnce(RepoError) -> AppError {
    move |e| match e {
        RepoError::NotFound(_) => not_found(id),
        other => other.into(),
    }
}

pub async fn get_profile(pool: &SqlitePool, id: i64) -> Result<Restaurant, AppError> {
    restaurant::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Public listing; `open_only` keeps restaurants currently accepting orders
pub async fn list_profiles(pool: &SqlitePool, open_only: bool) -> Result<Vec<Restaurant>, AppError> {
    Ok(restaurant::find_all(pool, open_only).await?)
}

/// Overwrite the fields present in `body`
///
/// `body` is raw JSON so that attempts to write `password`, `id` or the
/// timestamps are refused by name instead of silently dropped.
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    body: Value,
) -> Result<Restaurant, AppError> {
    reject_locked_fields(&body, RestaurantUpdate::LOCKED_FIELDS)?;
    let data: RestaurantUpdate = serde_json::from_value(body)
        .map_err(|e| AppError::validation(format!("Invalid profile update: {e}")))?;
    validate_payload(&data)?;
    validate_optional_text(&data.location, "location", MAX_ADDRESS_LEN)?;
    validate_optional_text(&data.profile_image, "profileImage", MAX_URL_LEN)?;

    if let Some(username) = &data.username
        && restaurant::username_taken(pool, username.trim(), Some(id)).await?
    {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }
    if let Some(email) = &data.email
        && restaurant::email_taken(pool, email.trim(), Some(id)).await?
    {
        return Err(AppError::new(ErrorCode::EmailExists));
    }

    let updated = restaurant::update(pool, id, data)
        .await
        .map_err(map_missing(id))?;
    tracing::info!(restaurant_id = id, "Restaurant profile updated");
    Ok(updated)
}

/// Flip the open/closed flag; open and close times are informational only
pub async fn set_open_status(
    pool: &SqlitePool,
    id: i64,
    is_open: bool,
) -> Result<Restaurant, AppError> {
    let updated = restaurant::set_open_status(pool, id, is_open)
        .await
        .map_err(map_missing(id))?;
    tracing::info!(restaurant_id = id, is_open, "Restaurant open status changed");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::fixtures::seed_restaurant;
    use serde_json::json;

    #[tokio::test]
    async fn update_overwrites_given_fields() {
        let db = DbService::in_memory().await.unwrap();
        let id = seed_restaurant(&db.pool, "cafe1").await;

        let updated = update_profile(
            &db.pool,
            id,
            json!({ "location": "Harbour 9", "deliveryRange": "7.5", "reviews": ["nice"] }),
        )
        .await
        .unwrap();
        assert_eq!(updated.location, "Harbour 9");
        assert_eq!(updated.delivery_range, 7.5);
        assert_eq!(updated.reviews, vec!["nice".to_string()]);
        assert_eq!(updated.username, "cafe1");
    }

    #[tokio::test]
    async fn password_and_id_are_refused() {
        let db = DbService::in_memory().await.unwrap();
        let id = seed_restaurant(&db.pool, "cafe1").await;

        for body in [json!({ "password": "newpass123" }), json!({ "id": 5 })] {
            let err = update_profile(&db.pool, id, body).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::FieldNotEditable);
        }
    }

    #[tokio::test]
    async fn identity_collisions_are_reported() {
        let db = DbService::in_memory().await.unwrap();
        let id = seed_restaurant(&db.pool, "cafe1").await;
        seed_restaurant(&db.pool, "cafe2").await;

        let err = update_profile(&db.pool, id, json!({ "username": "cafe2" }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameExists);

        let err = update_profile(&db.pool, id, json!({ "email": "cafe2@example.com" }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailExists);

        // keeping one's own email is not a collision
        assert!(
            update_profile(&db.pool, id, json!({ "email": "cafe1@example.com" }))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn open_status_toggles_and_filters_listing() {
        let db = DbService::in_memory().await.unwrap();
        let id = seed_restaurant(&db.pool, "cafe1").await;

        let closed = set_open_status(&db.pool, id, false).await.unwrap();
        assert!(!closed.open_close_status);
        assert!(list_profiles(&db.pool, true).await.unwrap().is_empty());

        set_open_status(&db.pool, id, true).await.unwrap();
        assert_eq!(list_profiles(&db.pool, true).await.unwrap().len(), 1);

        let err = set_open_status(&db.pool, 999, true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }
}
