//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

const MENU_ITEM_SELECT: &str = "SELECT id, restaurant_id, name, description, price, category, image, is_available, rating, created_at, updated_at FROM menu_item";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Every item of one restaurant, no pagination
pub async fn find_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE restaurant_id = ? ORDER BY category, name, id");
    let rows = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: MenuItemCreate,
) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO menu_item (id, restaurant_id, name, description, price, category, image, is_available, rating, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?9)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(data.name.trim())
    .bind(data.description)
    .bind(data.price)
    .bind(data.category.trim())
    .bind(data.image)
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), category = COALESCE(?4, category), image = COALESCE(?5, image), is_available = COALESCE(?6, is_available), rating = COALESCE(?7, rating), updated_at = ?8 WHERE id = ?9",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.description)
    .bind(data.price)
    .bind(data.category.as_deref().map(str::trim))
    .bind(data.image)
    .bind(data.is_available)
    .bind(data.rating)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Hard delete; past orders keep their snapshot lines
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::fixtures::{seed_restaurant, tea};

    #[tokio::test]
    async fn create_and_list_by_owner() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_restaurant(&db.pool, "cafe1").await;
        let other = seed_restaurant(&db.pool, "cafe2").await;

        let item = create(&db.pool, owner, tea(2.5)).await.unwrap();
        assert_eq!(item.restaurant_id, owner);
        assert!(item.is_available);
        assert_eq!(item.rating, 0.0);

        assert_eq!(find_by_restaurant(&db.pool, owner).await.unwrap(), vec![item]);
        assert!(find_by_restaurant(&db.pool, other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_owner_and_untouched_fields() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_restaurant(&db.pool, "cafe1").await;
        let item = create(&db.pool, owner, tea(2.5)).await.unwrap();

        let updated = update(
            &db.pool,
            item.id,
            MenuItemUpdate {
                price: Some(3.0),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 3.0);
        assert!(!updated.is_available);
        assert_eq!(updated.name, "Tea");
        assert_eq!(updated.restaurant_id, owner);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_restaurant(&db.pool, "cafe1").await;
        let item = create(&db.pool, owner, tea(2.5)).await.unwrap();

        assert!(delete(&db.pool, item.id).await.unwrap());
        assert!(!delete(&db.pool, item.id).await.unwrap());
        assert!(find_by_id(&db.pool, item.id).await.unwrap().is_none());
        assert!(matches!(
            update(&db.pool, item.id, MenuItemUpdate::default()).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
