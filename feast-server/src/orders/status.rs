//! Order status transition table
//!
//! All status changes go through [`TransitionPolicy::check`].
//!
//! `Permissive` (default) accepts any recognized status from any status,
//! including reopening a cancelled or delivered order.
//!
//! `ForwardOnly`, opt-in:
//!
//! ```text
//! pending ─▶ preparing ─▶ ready ─▶ out_for_delivery
//!    │           │          │
//!    └───────────┴──────────┴────▶ cancelled
//! ```
//!
//! Skipping ahead along the chain is allowed (`pending → ready`), going
//! back is not, and terminal statuses never change. Re-applying the
//! current status succeeds without effect.

use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use std::str::FromStr;

/// Which status changes are allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    ForwardOnly,
    #[default]
    Permissive,
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward_only" | "forward-only" | "strict" => Ok(Self::ForwardOnly),
            "permissive" | "any" => Ok(Self::Permissive),
            other => Err(format!("unknown order status policy: {other}")),
        }
    }
}

/// Position in the delivery chain; `None` for cancelled
fn chain_rank(status: OrderStatus) -> Option<u8> {
    match status {
        OrderStatus::Pending => Some(0),
        OrderStatus::Preparing => Some(1),
        OrderStatus::Ready => Some(2),
        OrderStatus::OutForDelivery => Some(3),
        OrderStatus::Cancelled => None,
    }
}

impl TransitionPolicy {
    /// Whether `from → to` is allowed under this policy
    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        if from == to {
            return true;
        }
        match self {
            Self::Permissive => true,
            Self::ForwardOnly => {
                if from.is_terminal() {
                    return false;
                }
                match (chain_rank(from), chain_rank(to)) {
                    (_, None) => true,
                    (Some(a), Some(b)) => b > a,
                    (None, Some(_)) => false,
                }
            }
        }
    }

    /// Statuses reachable from `from`, excluding `from` itself
    pub fn next_statuses(&self, from: OrderStatus) -> Vec<OrderStatus> {
        OrderStatus::ALL
            .into_iter()
            .filter(|to| *to != from && self.allows(from, *to))
            .collect()
    }

    /// Reject a disallowed transition with an order-status error
    pub fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
        if self.allows(from, to) {
            return Ok(());
        }
        Err(AppError::with_message(
            ErrorCode::OrderTransitionDenied,
            format!("Cannot change order status from {from} to {to}"),
        )
        .with_detail("from", from.as_str())
        .with_detail("to", to.as_str()))
    }
}

/// Parse user-supplied status text, mapping failures to an order-status error
pub fn parse_status(raw: &str) -> Result<OrderStatus, AppError> {
    raw.parse::<OrderStatus>()
        .map_err(|_| AppError::invalid_status(raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn forward_only_allows_moving_down_the_chain() {
        let p = TransitionPolicy::ForwardOnly;
        assert!(p.allows(Pending, Preparing));
        assert!(p.allows(Preparing, Ready));
        assert!(p.allows(Ready, OutForDelivery));
        assert!(p.allows(Pending, Ready));
        assert!(p.allows(Pending, OutForDelivery));
    }

    #[test]
    fn forward_only_rejects_going_back() {
        let p = TransitionPolicy::ForwardOnly;
        assert!(!p.allows(Ready, Pending));
        assert!(!p.allows(Preparing, Pending));
        assert!(!p.allows(OutForDelivery, Ready));
    }

    #[test]
    fn cancel_from_any_open_status() {
        let p = TransitionPolicy::ForwardOnly;
        for from in [Pending, Preparing, Ready] {
            assert!(p.allows(from, Cancelled), "{from} -> cancelled");
        }
        assert!(!p.allows(OutForDelivery, Cancelled));
    }

    #[test]
    fn terminal_statuses_are_final() {
        let p = TransitionPolicy::ForwardOnly;
        assert!(p.next_statuses(Cancelled).is_empty());
        assert!(p.next_statuses(OutForDelivery).is_empty());
        assert!(p.allows(Cancelled, Cancelled));
    }

    #[test]
    fn next_statuses_from_pending() {
        assert_eq!(
            TransitionPolicy::ForwardOnly.next_statuses(Pending),
            vec![Preparing, Ready, OutForDelivery, Cancelled]
        );
    }

    #[test]
    fn permissive_allows_every_pair() {
        let p = TransitionPolicy::Permissive;
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert!(p.allows(from, to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn check_reports_transition_error() {
        let err = TransitionPolicy::ForwardOnly
            .check(Cancelled, Pending)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderTransitionDenied);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_status_rejects_unknown_values() {
        assert_eq!(parse_status(" ready ").unwrap(), Ready);
        assert_eq!(parse_status("out for delivery").unwrap(), OutForDelivery);
        let err = parse_status("completed").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);
    }

    #[test]
    fn default_policy_lets_any_status_follow_any_other() {
        let p = TransitionPolicy::default();
        assert_eq!(p, TransitionPolicy::Permissive);
        assert!(p.check(Cancelled, Pending).is_ok());
        assert!(p.check(OutForDelivery, Preparing).is_ok());
    }

    #[test]
    fn policy_from_env_text() {
        assert_eq!(
            "permissive".parse::<TransitionPolicy>(),
            Ok(TransitionPolicy::Permissive)
        );
        assert_eq!(
            "FORWARD_ONLY".parse::<TransitionPolicy>(),
            Ok(TransitionPolicy::ForwardOnly)
        );
        assert!("chaos".parse::<TransitionPolicy>().is_err());
    }
}
