//! Peg offset.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::pegging::errors::PegError;
use crate::domain::shared::Money;

/// Distance kept between the pegged price and the anchor price.
///
/// Always non-negative. Applied away from the opposite side of the book so
/// the order stays passive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Money", into = "Money")]
pub struct PegOffset(Money);

impl PegOffset {
    /// No offset: the order joins the best price on its own side.
    pub const ZERO: Self = Self(Money::ZERO);

    /// Create an offset.
    ///
    /// # Errors
    ///
    /// Returns [`PegError::NegativeOffset`] if the amount is below zero.
    pub fn new(amount: Money) -> Result<Self, PegError> {
        if amount.is_negative() {
            return Err(PegError::NegativeOffset {
                offset: amount.to_string(),
            });
        }
        Ok(Self(amount))
    }

    /// Get the offset amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.0
    }
}

impl Default for PegOffset {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Money> for PegOffset {
    type Error = PegError;

    fn try_from(value: Money) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PegOffset> for Money {
    fn from(value: PegOffset) -> Self {
        value.0
    }
}

impl fmt::Display for PegOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
