//! Pegged order state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a pegged order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PegState {
    /// No quote received yet.
    #[default]
    AwaitingFirstQuote,
    /// An order was submitted and is awaiting acknowledgment.
    Submitting,
    /// The order is acknowledged and resting.
    Live,
    /// A cancel was requested and is awaiting confirmation.
    PendingCancel,
    /// Terminal: the requested quantity was executed.
    Filled,
    /// Terminal: a submission was rejected.
    Rejected,
    /// Terminal: the working order ended without a cancel being requested.
    Canceled,
}

impl PegState {
    /// Returns true if no further event changes the state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Rejected | Self::Canceled)
    }

    /// Returns true if an order is outstanding at the gateway.
    #[must_use]
    pub const fn has_working_order(&self) -> bool {
        matches!(self, Self::Submitting | Self::Live | Self::PendingCancel)
    }
}

impl fmt::Display for PegState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AwaitingFirstQuote => "AWAITING_FIRST_QUOTE",
            Self::Submitting => "SUBMITTING",
            Self::Live => "LIVE",
            Self::PendingCancel => "PENDING_CANCEL",
            Self::Filled => "FILLED",
            Self::Rejected => "REJECTED",
            Self::Canceled => "CANCELED",
        };
        write!(f, "{s}")
    }
}
