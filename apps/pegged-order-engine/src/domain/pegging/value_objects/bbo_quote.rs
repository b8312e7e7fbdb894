//! Best bid/offer quote.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::Side;
use crate::domain::shared::{Money, Symbol, Timestamp};

/// Top of book for one instrument at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BboQuote {
    /// Instrument quoted.
    pub symbol: Symbol,
    /// Best bid price.
    pub bid: Money,
    /// Best ask price.
    pub ask: Money,
    /// Quote time.
    pub timestamp: Timestamp,
}

impl BboQuote {
    /// Create a quote stamped with the current time.
    #[must_use]
    pub fn new(symbol: Symbol, bid: Money, ask: Money) -> Self {
        Self {
            symbol,
            bid,
            ask,
            timestamp: Timestamp::now(),
        }
    }

    /// Best price on the given side of the book.
    #[must_use]
    pub const fn anchor(&self, side: Side) -> Money {
        match side {
            Side::Bid => self.bid,
            Side::Ask => self.ask,
        }
    }

    /// Returns true if either side of the book is empty (zero priced).
    #[must_use]
    pub fn is_one_sided(&self) -> bool {
        self.bid.is_zero() || self.ask.is_zero()
    }

    /// Ask minus bid.
    #[must_use]
    pub fn spread(&self) -> Money {
        self.ask - self.bid
    }
}
