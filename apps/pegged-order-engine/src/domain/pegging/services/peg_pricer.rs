//! Peg price calculation.

use crate::domain::order_execution::Side;
use crate::domain::pegging::value_objects::{BboQuote, PegOffset};
use crate::domain::shared::Money;

/// Computes where a pegged order should rest.
///
/// The anchor is the best price on the order's own side. The target moves
/// away from the opposite side by the offset: `bid - offset` for a bid,
/// `ask + offset` for an ask.
#[derive(Debug, Clone, Copy, Default)]
pub struct PegPricer;

impl PegPricer {
    /// Target price for the given side, quote and offset.
    #[must_use]
    pub fn target_price(side: Side, quote: &BboQuote, offset: PegOffset) -> Money {
        let anchor = quote.anchor(side);
        match side {
            Side::Bid => anchor - offset.amount(),
            Side::Ask => anchor + offset.amount(),
        }
    }

    /// Returns true if the working price no longer matches the target.
    ///
    /// Comparison is exact: any difference counts as drift.
    #[must_use]
    pub fn has_drifted(side: Side, quote: &BboQuote, offset: PegOffset, working_price: Money) -> bool {
        Self::target_price(side, quote, offset) != working_price
    }
}
