//! Order status reported by the execution gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status carried by an execution report.
///
/// `CancelReject` refuses a cancel request; the order it names keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order sent, awaiting venue acknowledgment.
    PendingNew,
    /// Order accepted and resting at the venue.
    New,
    /// Order partially filled.
    PartiallyFilled,
    /// Order completely filled.
    Filled,
    /// Cancel request received, awaiting confirmation.
    PendingCancel,
    /// Cancel request refused; the order is still working.
    CancelReject,
    /// Order canceled.
    Canceled,
    /// Order rejected by the venue.
    Rejected,
    /// Order expired.
    Expired,
    /// Order suspended by the venue.
    Suspended,
    /// Order stopped by the venue.
    Stopped,
    /// Order ended with the trading session.
    DoneForDay,
}

impl OrderStatus {
    /// Returns true if the order can no longer change state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Filled
                | Self::Canceled
                | Self::Rejected
                | Self::Expired
                | Self::Stopped
                | Self::DoneForDay
        )
    }

    /// Returns true if this status reports an execution.
    #[must_use]
    pub const fn is_fill(&self) -> bool {
        matches!(self, Self::PartiallyFilled | Self::Filled)
    }

    /// Returns true if this status acknowledges the order as working.
    #[must_use]
    pub const fn is_acknowledgment(&self) -> bool {
        matches!(self, Self::New | Self::PartiallyFilled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PendingNew => "PENDING_NEW",
            Self::New => "NEW",
            Self::PartiallyFilled => "PARTIALLY_FILLED",
            Self::Filled => "FILLED",
            Self::PendingCancel => "PENDING_CANCEL",
            Self::CancelReject => "CANCEL_REJECT",
            Self::Canceled => "CANCELED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
            Self::Suspended => "SUSPENDED",
            Self::Stopped => "STOPPED",
            Self::DoneForDay => "DONE_FOR_DAY",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_is_terminal() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(OrderStatus::Expired.is_terminal());
        assert!(OrderStatus::Stopped.is_terminal());
        assert!(OrderStatus::DoneForDay.is_terminal());

        assert!(!OrderStatus::PendingNew.is_terminal());
        assert!(!OrderStatus::New.is_terminal());
        assert!(!OrderStatus::PartiallyFilled.is_terminal());
        assert!(!OrderStatus::PendingCancel.is_terminal());
        assert!(!OrderStatus::CancelReject.is_terminal());
        assert!(!OrderStatus::Suspended.is_terminal());
    }

    #[test]
    fn order_status_is_fill() {
        assert!(OrderStatus::PartiallyFilled.is_fill());
        assert!(OrderStatus::Filled.is_fill());
        assert!(!OrderStatus::New.is_fill());
        assert!(!OrderStatus::Canceled.is_fill());
    }

    #[test]
    fn order_status_is_acknowledgment() {
        assert!(OrderStatus::New.is_acknowledgment());
        assert!(OrderStatus::PartiallyFilled.is_acknowledgment());
        assert!(!OrderStatus::PendingNew.is_acknowledgment());
        assert!(!OrderStatus::Filled.is_acknowledgment());
    }

    #[test]
    fn order_status_display_matches_serde() {
        for status in [
            OrderStatus::PendingNew,
            OrderStatus::PartiallyFilled,
            OrderStatus::CancelReject,
            OrderStatus::DoneForDay,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
