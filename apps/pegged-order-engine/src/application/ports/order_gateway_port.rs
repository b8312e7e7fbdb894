//! Order Gateway Port (Driven Port)
//!
//! Interface for submitting and canceling orders at an execution venue.
//! Every submitted order gets its own stream of execution reports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::domain::order_execution::{ExecutionReport, Side, TimeInForce};
use crate::domain::pegging::OrderSubmission;
use crate::domain::shared::{Money, OrderId, Quantity, Symbol};

/// Stream of execution reports for one submitted order.
///
/// The gateway closes the stream after the order's terminal report.
pub type ExecutionReportStream = mpsc::UnboundedReceiver<ExecutionReport>;

/// Request to submit a limit order to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOrderRequest {
    /// Client order ID the gateway reports on.
    pub client_order_id: OrderId,
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: Side,
    /// Quantity.
    pub quantity: Quantity,
    /// Limit price.
    pub limit_price: Money,
    /// ISO currency code.
    pub currency: String,
    /// Destination venue.
    pub destination: Option<String>,
    /// Time in force.
    pub time_in_force: TimeInForce,
}

impl SubmitOrderRequest {
    /// Create a DAY limit order request in USD with no explicit destination.
    #[must_use]
    pub fn limit(
        client_order_id: OrderId,
        symbol: Symbol,
        side: Side,
        quantity: Quantity,
        limit_price: Money,
    ) -> Self {
        Self {
            client_order_id,
            symbol,
            side,
            quantity,
            limit_price,
            currency: "USD".to_string(),
            destination: None,
            time_in_force: TimeInForce::Day,
        }
    }

    /// Set time in force.
    #[must_use]
    pub const fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    /// Set currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set destination venue.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

impl From<OrderSubmission> for SubmitOrderRequest {
    fn from(submission: OrderSubmission) -> Self {
        let OrderSubmission { order_id, fields } = submission;
        Self {
            client_order_id: order_id,
            symbol: fields.symbol,
            side: fields.side,
            quantity: fields.quantity,
            limit_price: fields.price,
            currency: fields.currency,
            destination: fields.destination,
            time_in_force: fields.time_in_force,
        }
    }
}

/// Order gateway error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Connection error.
    #[error("Gateway connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Order refused before it reached the book.
    #[error("Order rejected: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
    },

    /// Order not found or no longer working.
    #[error("Order not found: {order_id}")]
    OrderNotFound {
        /// The missing order ID.
        order_id: String,
    },

    /// Unknown error.
    #[error("Gateway error: {message}")]
    Unknown {
        /// Error details.
        message: String,
    },
}

/// Port for order execution.
#[async_trait]
pub trait OrderGatewayPort: Send + Sync {
    /// Submit a new order and subscribe to its execution reports.
    ///
    /// A venue that refuses the order synchronously returns
    /// [`GatewayError::Rejected`]; one that refuses it asynchronously sends
    /// a `Rejected` report on the stream.
    async fn submit(&self, request: SubmitOrderRequest)
    -> Result<ExecutionReportStream, GatewayError>;

    /// Request cancellation of a working order.
    ///
    /// The outcome arrives on the order's report stream.
    async fn cancel(&self, order_id: &OrderId) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderFields;
    use rust_decimal_macros::dec;

    #[test]
    fn submit_order_request_limit() {
        let request = SubmitOrderRequest::limit(
            OrderId::new("peg-1"),
            Symbol::new("TST"),
            Side::Bid,
            Quantity::from_i64(1000),
            Money::new(dec!(0.99)),
        )
        .with_currency("CAD")
        .with_destination("TSX")
        .with_time_in_force(TimeInForce::Gtc);

        assert_eq!(request.limit_price, Money::new(dec!(0.99)));
        assert_eq!(request.currency, "CAD");
        assert_eq!(request.destination.as_deref(), Some("TSX"));
        assert_eq!(request.time_in_force, TimeInForce::Gtc);
    }

    #[test]
    fn submit_order_request_from_submission() {
        let fields = OrderFields::limit(
            Symbol::new("TST"),
            Side::Ask,
            Quantity::from_i64(1000),
            Money::new(dec!(5.00)),
        )
        .with_destination("TSX");
        let submission = OrderSubmission::new(
            OrderId::new("peg-3"),
            &fields,
            Money::new(dec!(1.02)),
            Quantity::from_i64(990),
        );

        let request = SubmitOrderRequest::from(submission);
        assert_eq!(request.client_order_id, OrderId::new("peg-3"));
        assert_eq!(request.side, Side::Ask);
        assert_eq!(request.quantity, Quantity::from_i64(990));
        assert_eq!(request.limit_price, Money::new(dec!(1.02)));
        assert_eq!(request.destination.as_deref(), Some("TSX"));
    }

    #[test]
    fn gateway_error_display() {
        let err = GatewayError::Rejected {
            reason: "no market".to_string(),
        };
        assert_eq!(err.to_string(), "Order rejected: no market");
    }
}
