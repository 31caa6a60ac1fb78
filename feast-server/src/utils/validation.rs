//! Input validation helpers
//!
//! Derive-based checks live on the DTOs in `shared::models`; the helpers
//! here cover what derives cannot express (trim-aware emptiness, locked
//! fields of partial updates).

use serde_json::Value;
use validator::Validate;

use crate::utils::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, menu item, category
pub const MAX_NAME_LEN: usize = 100;

/// Descriptions and free text
pub const MAX_NOTE_LEN: usize = 1000;

/// Phone numbers, time-of-day strings
pub const MAX_SHORT_TEXT_LEN: usize = 50;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Run derive validation, folding every failing field into one error
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors.errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::validation(format!("Invalid fields: {}", fields.join(", ")))
            .with_detail("fields", fields)
    })
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Reject a JSON object that names any of `locked`
pub fn reject_locked_fields(body: &Value, locked: &[&str]) -> Result<(), AppError> {
    let Some(map) = body.as_object() else {
        return Err(AppError::validation("Request body must be a JSON object"));
    };
    if let Some(field) = locked.iter().find(|f| map.contains_key(**f)) {
        return Err(
            AppError::with_message(ErrorCode::FieldNotEditable, format!("{field} cannot be changed here"))
                .with_detail("field", *field),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::RestaurantUpdate;

    #[test]
    fn required_text_rejects_blank_and_long() {
        assert!(validate_required_text("Tea", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn optional_text_allows_none() {
        assert!(validate_optional_text(&None, "location", MAX_ADDRESS_LEN).is_ok());
        let long = Some("x".repeat(MAX_ADDRESS_LEN + 1));
        assert!(validate_optional_text(&long, "location", MAX_ADDRESS_LEN).is_err());
    }

    #[test]
    fn locked_fields_are_reported_by_name() {
        let body = json!({ "location": "Harbour 9", "password": "x" });
        let err = reject_locked_fields(&body, RestaurantUpdate::LOCKED_FIELDS).unwrap_err();
        assert_eq!(err.code, ErrorCode::FieldNotEditable);
        assert_eq!(err.details.unwrap()["field"], "password");

        let body = json!({ "location": "Harbour 9" });
        assert!(reject_locked_fields(&body, RestaurantUpdate::LOCKED_FIELDS).is_ok());
        assert!(reject_locked_fields(&json!([1]), RestaurantUpdate::LOCKED_FIELDS).is_err());
    }

    #[test]
    fn payload_errors_list_fields() {
        let update = RestaurantUpdate {
            ratings: Some(9.0),
            ..Default::default()
        };
        let err = validate_payload(&update).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("ratings"));
    }
}
