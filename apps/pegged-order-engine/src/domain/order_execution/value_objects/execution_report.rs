//! Execution report from the order gateway.

use serde::{Deserialize, Serialize};

use super::OrderStatus;
use crate::domain::shared::{Money, OrderId, Quantity, Timestamp};

/// A single status transition of an order (FIX `ExecutionReport`).
///
/// `last_quantity` is the incremental quantity executed by this report and
/// is zero unless the status is a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Order this report refers to.
    pub order_id: OrderId,
    /// Per-order sequence number assigned by the gateway.
    pub sequence: u64,
    /// Status after this report.
    pub status: OrderStatus,
    /// Quantity executed by this report.
    pub last_quantity: Quantity,
    /// Price of the execution, zero when nothing was executed.
    pub last_price: Money,
    /// Free-form text, typically a rejection reason.
    pub text: Option<String>,
    /// When the gateway produced the report.
    pub timestamp: Timestamp,
}

impl ExecutionReport {
    /// Create a report carrying a status change without an execution.
    #[must_use]
    pub fn new(order_id: OrderId, status: OrderStatus) -> Self {
        Self {
            order_id,
            sequence: 0,
            status,
            last_quantity: Quantity::ZERO,
            last_price: Money::ZERO,
            text: None,
            timestamp: Timestamp::now(),
        }
    }

    /// Create a rejection report with a reason.
    #[must_use]
    pub fn rejected(order_id: OrderId, reason: impl Into<String>) -> Self {
        Self::new(order_id, OrderStatus::Rejected).with_text(reason)
    }

    /// Attach an execution to the report.
    #[must_use]
    pub const fn with_fill(mut self, quantity: Quantity, price: Money) -> Self {
        self.last_quantity = quantity;
        self.last_price = price;
        self
    }

    /// Attach free-form text to the report.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the gateway sequence number.
    #[must_use]
    pub const fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Returns true if the report carries a positive executed quantity.
    #[must_use]
    pub fn has_fill(&self) -> bool {
        self.last_quantity.is_positive()
    }
}
