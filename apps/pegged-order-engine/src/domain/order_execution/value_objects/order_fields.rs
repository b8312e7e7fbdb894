//! Order fields describing the logical order to work.

use serde::{Deserialize, Serialize};

use super::{Side, TimeInForce};
use crate::domain::shared::{DomainError, Money, Quantity, Symbol};

/// Immutable description of the order a pegged order works.
///
/// `price` is a template only: the working price is always derived from the
/// market when the order is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFields {
    /// Instrument to trade.
    pub symbol: Symbol,
    /// Side of the book.
    pub side: Side,
    /// Total requested quantity.
    pub quantity: Quantity,
    /// Template limit price.
    pub price: Money,
    /// ISO currency code.
    pub currency: String,
    /// Destination venue, if routing is explicit.
    pub destination: Option<String>,
    /// Time in force for every submission.
    pub time_in_force: TimeInForce,
}

impl OrderFields {
    /// Default currency for new order fields.
    pub const DEFAULT_CURRENCY: &'static str = "USD";

    /// Create limit order fields with default currency, no destination and
    /// DAY time in force.
    #[must_use]
    pub fn limit(symbol: Symbol, side: Side, quantity: Quantity, price: Money) -> Self {
        Self {
            symbol,
            side,
            quantity,
            price,
            currency: Self::DEFAULT_CURRENCY.to_string(),
            destination: None,
            time_in_force: TimeInForce::Day,
        }
    }

    /// Set the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the destination venue.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set the time in force.
    #[must_use]
    pub const fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Validate the fields before any order is worked.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is invalid, the quantity is not positive,
    /// the template price is negative, the currency is empty or the time in
    /// force cannot rest on the book.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.symbol.validate()?;
        self.quantity.validate_for_order()?;
        self.price.validate_for_order()?;

        if self.currency.trim().is_empty() {
            return Err(DomainError::invalid_value(
                "currency",
                "Currency cannot be empty",
            ));
        }

        if !self.time_in_force.can_rest() {
            return Err(DomainError::invalid_value(
                "time_in_force",
                format!("{} orders cannot rest on the book", self.time_in_force),
            ));
        }

        Ok(())
    }
}
