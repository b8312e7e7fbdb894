//! Application Ports
//!
//! Driven ports for the two collaborators of the pegged order engine:
//! the order gateway and the quote feed.

mod order_gateway_port;
mod quote_feed_port;

pub use order_gateway_port::{
    ExecutionReportStream, GatewayError, OrderGatewayPort, SubmitOrderRequest,
};
pub use quote_feed_port::{BboQuoteStream, QuoteFeedError, QuoteFeedPort};
