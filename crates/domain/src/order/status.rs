//! Order status state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The status of an order in its delivery lifecycle.
///
/// State transitions:
/// ```text
/// Created ──► Confirmed ──► Dispatched ──► Delivered
///    │            │
///    └────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order is open, items can be added/removed.
    #[default]
    Created,

    /// Order has been accepted by the retailer.
    Confirmed,

    /// Order has left for delivery.
    Dispatched,

    /// Order has been handed to the customer (terminal state).
    Delivered,

    /// Order was cancelled (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Created,
        OrderStatus::Confirmed,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns the statuses reachable from this one in a single step.
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Created => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Dispatched, OrderStatus::Cancelled],
            OrderStatus::Dispatched => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    /// Returns true if the transition table permits moving to `target`.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns true if the order can be cancelled in this state.
    ///
    /// Narrower than "not terminal": a dispatched order cannot be cancelled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Created | OrderStatus::Confirmed)
    }

    /// Returns true if items can be modified in this state.
    pub fn can_modify_items(&self) -> bool {
        matches!(self, OrderStatus::Created)
    }

    /// Returns the status tag as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Dispatched => "DISPATCHED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    /// Parses a status tag, case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_uppercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::validation(
                    "status",
                    format!(
                        "'{raw}' is not one of CREATED, CONFIRMED, DISPATCHED, DELIVERED, CANCELLED"
                    ),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_status_is_created() {
        assert_eq!(OrderStatus::default(), OrderStatus::Created);
    }

    #[test]
    fn test_transition_matrix() {
        use OrderStatus::*;
        let allowed = [
            (Created, Confirmed),
            (Created, Cancelled),
            (Confirmed, Dispatched),
            (Confirmed, Cancelled),
            (Dispatched, Delivered),
        ];

        let mut permitted = 0;
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{from} -> {to} should be {expected}"
                );
                if expected {
                    permitted += 1;
                }
            }
        }
        assert_eq!(permitted, 5);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Created.is_terminal());
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert!(!OrderStatus::Dispatched.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_cancellable_is_narrower_than_non_terminal() {
        assert!(OrderStatus::Created.is_cancellable());
        assert!(OrderStatus::Confirmed.is_cancellable());
        assert!(!OrderStatus::Dispatched.is_cancellable());
        assert!(!OrderStatus::Dispatched.is_terminal());
        assert!(!OrderStatus::Delivered.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_only_created_can_modify_items() {
        for status in OrderStatus::ALL {
            assert_eq!(status.can_modify_items(), status == OrderStatus::Created);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("confirmed".parse::<OrderStatus>().unwrap(), OrderStatus::Confirmed);
        assert_eq!(" Dispatched ".parse::<OrderStatus>().unwrap(), OrderStatus::Dispatched);
        assert_eq!("DELIVERED".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let err = "SHIPPED".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Created.to_string(), "CREATED");
        assert_eq!(OrderStatus::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn test_serialization_uses_status_tag() {
        let json = serde_json::to_string(&OrderStatus::Dispatched).unwrap();
        assert_eq!(json, "\"DISPATCHED\"");
        let parsed: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OrderStatus::Dispatched);
    }
}
