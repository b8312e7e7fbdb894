//! Pegging events and commands.
//!
//! Events are the inputs of the pegged order state machine; commands are the
//! gateway actions it asks for in response.

use serde::{Deserialize, Serialize};

use super::value_objects::BboQuote;
use crate::domain::order_execution::{ExecutionReport, OrderFields};
use crate::domain::shared::{Money, OrderId, Quantity};

/// Input to the pegged order state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PegEvent {
    /// New top of book.
    Quote(BboQuote),
    /// Execution report for one of the submitted orders.
    Report(ExecutionReport),
}

impl From<BboQuote> for PegEvent {
    fn from(quote: BboQuote) -> Self {
        Self::Quote(quote)
    }
}

impl From<ExecutionReport> for PegEvent {
    fn from(report: ExecutionReport) -> Self {
        Self::Report(report)
    }
}

/// A new limit order to send to the gateway.
///
/// `fields` carries the submitted quantity and price in place of the
/// template ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// Client order id the gateway will report on.
    pub order_id: OrderId,
    /// Order fields with the pegged price and remaining quantity.
    pub fields: OrderFields,
}

impl OrderSubmission {
    /// Create a submission from template fields, a price and a quantity.
    #[must_use]
    pub fn new(order_id: OrderId, template: &OrderFields, price: Money, quantity: Quantity) -> Self {
        let mut fields = template.clone();
        fields.price = price;
        fields.quantity = quantity;
        Self { order_id, fields }
    }

    /// Submitted limit price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.fields.price
    }

    /// Submitted quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.fields.quantity
    }
}

/// Gateway action requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PegCommand {
    /// Submit a new order.
    Submit(OrderSubmission),
    /// Cancel a working order.
    Cancel {
        /// Order to cancel.
        order_id: OrderId,
    },
}

impl PegCommand {
    /// Order the command acts on.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::Submit(submission) => &submission.order_id,
            Self::Cancel { order_id } => order_id,
        }
    }
}
