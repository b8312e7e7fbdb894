//! Quote Feed Port (Driven Port)
//!
//! Interface for subscribing to best bid/offer quotes.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::pegging::BboQuote;
use crate::domain::shared::Symbol;

/// Stream of BBO quotes for one subscription, in publication order.
pub type BboQuoteStream = mpsc::UnboundedReceiver<BboQuote>;

/// Quote feed error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteFeedError {
    /// Connection error.
    #[error("Quote feed connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Symbol not found.
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound {
        /// The symbol.
        symbol: String,
    },

    /// Subscription refused.
    #[error("Subscription error: {message}")]
    SubscriptionError {
        /// Error details.
        message: String,
    },
}

/// Port for market data.
#[async_trait]
pub trait QuoteFeedPort: Send + Sync {
    /// Subscribe to BBO quotes for a symbol.
    ///
    /// The latest known quote, if any, is delivered first.
    async fn subscribe_bbo(&self, symbol: &Symbol) -> Result<BboQuoteStream, QuoteFeedError>;
}
