//! Restaurant Model

use crate::util::{lenient_f64, lenient_opt_f64};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Placeholder shown until a restaurant uploads its own picture
pub const DEFAULT_PROFILE_IMAGE: &str = "https://example.com/default-profile-image.png";

/// Restaurant profile (public-safe, never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub username: String,
    pub restaurant_name: String,
    pub contact_number: String,
    pub email: String,
    pub location: String,
    /// Delivery radius in kilometers
    pub delivery_range: f64,
    /// Free-form opening time, e.g. "08:00 AM"
    pub open_time: String,
    pub close_time: String,
    pub open_close_status: bool,
    pub ratings: f64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub reviews: Vec<String>,
    pub profile_image: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Restaurant registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub restaurant_name: String,
    #[validate(length(min = 1, max = 30))]
    pub contact_number: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(deserialize_with = "lenient_f64")]
    #[validate(range(min = 0.0))]
    pub delivery_range: f64,
    #[validate(length(min = 1, max = 20))]
    pub open_time: String,
    #[validate(length(min = 1, max = 20))]
    pub close_time: String,
    #[serde(default)]
    #[validate(url)]
    pub profile_image: Option<String>,
}

/// Profile update payload
///
/// Every present field overwrites the stored value. `password` and `id`
/// are refused before this type is ever built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    #[validate(length(min = 3, max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_range: Option<f64>,
    #[validate(length(min = 1, max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[validate(length(min = 1, max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_close_status: Option<bool>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl RestaurantUpdate {
    /// Body keys that can never be written through the profile endpoint
    pub const LOCKED_FIELDS: &'static [&'static str] =
        &["id", "_id", "password", "passwordHash", "createdAt", "updatedAt"];
}

/// Open/close toggle payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantStatusUpdate {
    pub open_close_status: bool,
}

/// Compact view returned next to a fresh token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub id: i64,
    pub username: String,
    pub restaurant_name: String,
    pub email: String,
}

impl From<&Restaurant> for RestaurantSummary {
    fn from(r: &Restaurant) -> Self {
        Self {
            id: r.id,
            username: r.username.clone(),
            restaurant_name: r.restaurant_name.clone(),
            email: r.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> serde_json::Value {
        serde_json::json!({
            "username": "cafe1",
            "password": "pw12345678",
            "restaurantName": "Cafe One",
            "contactNumber": "555-0100",
            "email": "cafe1@example.com",
            "location": "Main St 1",
            "deliveryRange": "5",
            "openTime": "08:00 AM",
            "closeTime": "10:00 PM"
        })
    }

    #[test]
    fn registration_parses_camel_case_and_coerces_range() {
        let data: RestaurantCreate = serde_json::from_value(registration()).unwrap();
        assert_eq!(data.restaurant_name, "Cafe One");
        assert_eq!(data.delivery_range, 5.0);
        assert!(data.profile_image.is_none());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn registration_rejects_short_password_and_bad_email() {
        let mut body = registration();
        body["password"] = "short".into();
        body["email"] = "not-an-email".into();
        let data: RestaurantCreate = serde_json::from_value(body).unwrap();
        let errors = data.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn profile_serializes_without_secrets() {
        let r = Restaurant {
            id: 1,
            username: "cafe1".into(),
            restaurant_name: "Cafe One".into(),
            contact_number: "555".into(),
            email: "c@example.com".into(),
            location: "here".into(),
            delivery_range: 3.0,
            open_time: "08:00".into(),
            close_time: "22:00".into(),
            open_close_status: true,
            ratings: 0.0,
            reviews: vec![],
            profile_image: DEFAULT_PROFILE_IMAGE.into(),
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["openCloseStatus"], true);
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(RestaurantSummary::from(&r).restaurant_name, "Cafe One");
    }
}
