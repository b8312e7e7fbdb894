//! Order configuration.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{OrderFields, Side, TimeInForce};
use crate::domain::shared::{Money, Quantity, Symbol};

/// The order to work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Instrument symbol.
    pub symbol: String,
    /// Side of the book.
    pub side: Side,
    /// Total quantity.
    pub quantity: Quantity,
    /// Template limit price.
    pub price: Money,
    /// ISO currency code.
    pub currency: String,
    /// Destination venue.
    pub destination: Option<String>,
    /// Time in force.
    pub time_in_force: TimeInForce,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            symbol: "TST".to_string(),
            side: Side::Bid,
            quantity: Quantity::from_i64(1000),
            price: Money::new(dec!(1.00)),
            currency: OrderFields::DEFAULT_CURRENCY.to_string(),
            destination: None,
            time_in_force: TimeInForce::Day,
        }
    }
}

impl OrderConfig {
    /// Build the order fields described by this configuration.
    #[must_use]
    pub fn to_order_fields(&self) -> OrderFields {
        let fields = OrderFields::limit(
            Symbol::new(&self.symbol),
            self.side,
            self.quantity,
            self.price,
        )
        .with_currency(&self.currency)
        .with_time_in_force(self.time_in_force);

        match &self.destination {
            Some(destination) => fields.with_destination(destination),
            None => fields,
        }
    }
}
