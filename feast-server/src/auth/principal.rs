//! Authenticated principal and the ownership predicate
//!
//! Every menu mutation and every order read or transition calls
//! [`ensure_owner`] before touching the resource.

use shared::error::{AppError, ErrorCode};

use crate::auth::PrincipalKind;
use crate::security_log;

/// Principal attached to a request by the auth middleware
///
/// Only built after the token verified and the principal row was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPrincipal {
    pub id: i64,
    pub kind: PrincipalKind,
    pub username: String,
}

impl CurrentPrincipal {
    pub fn is_restaurant(&self) -> bool {
        self.kind == PrincipalKind::Restaurant
    }

    /// Restaurant id of the caller, or 403 for customers
    pub fn require_restaurant(&self) -> Result<i64, AppError> {
        if self.is_restaurant() {
            Ok(self.id)
        } else {
            security_log!(
                "WARN",
                "restaurant_required",
                principal_id = self.id,
                username = self.username.as_str()
            );
            Err(AppError::new(ErrorCode::RestaurantRequired))
        }
    }
}

/// The caller must be the restaurant that owns the resource
pub fn ensure_owner(principal: &CurrentPrincipal, owner_id: i64) -> Result<(), AppError> {
    let restaurant_id = principal.require_restaurant()?;
    if restaurant_id != owner_id {
        security_log!(
            "WARN",
            "not_resource_owner",
            principal_id = restaurant_id,
            owner_id = owner_id
        );
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(id: i64) -> CurrentPrincipal {
        CurrentPrincipal {
            id,
            kind: PrincipalKind::Restaurant,
            username: format!("cafe{id}"),
        }
    }

    #[test]
    fn owner_passes_other_restaurant_is_forbidden() {
        assert!(ensure_owner(&restaurant(1), 1).is_ok());

        let err = ensure_owner(&restaurant(2), 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotResourceOwner);
        assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn customers_never_own_restaurant_resources() {
        let customer = CurrentPrincipal {
            id: 1,
            kind: PrincipalKind::Customer,
            username: "ann".into(),
        };
        let err = ensure_owner(&customer, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantRequired);
        assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);
    }
}
