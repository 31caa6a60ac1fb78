//! Seed data for repository and engine tests

use super::restaurant;
use shared::models::{MenuItemCreate, RestaurantCreate};
use sqlx::SqlitePool;

pub fn registration(username: &str, email: &str) -> RestaurantCreate {
    RestaurantCreate {
        username: username.into(),
        password: "pw12345678".into(),
        restaurant_name: format!("{username} kitchen"),
        contact_number: "555-0100".into(),
        email: email.into(),
        location: "Main St 1".into(),
        delivery_range: 5.0,
        open_time: "08:00 AM".into(),
        close_time: "10:00 PM".into(),
        profile_image: None,
    }
}

pub fn menu_item(name: &str, price: f64) -> MenuItemCreate {
    MenuItemCreate {
        name: name.into(),
        description: String::new(),
        price,
        category: "drinks".into(),
        image: String::new(),
        is_available: None,
    }
}

pub fn tea(price: f64) -> MenuItemCreate {
    menu_item("Tea", price)
}

pub async fn seed_restaurant(pool: &SqlitePool, username: &str) -> i64 {
    let data = registration(username, &format!("{username}@example.com"));
    restaurant::create(pool, &data, "hash")
        .await
        .expect("seed restaurant")
        .id
}
