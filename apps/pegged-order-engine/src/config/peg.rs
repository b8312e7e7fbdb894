//! Peg configuration.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::pegging::DEFAULT_ORDER_ID_PREFIX;
use crate::domain::shared::Money;

/// How the order is pegged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PegConfig {
    /// Distance from the anchor price.
    pub offset: Money,
    /// Prefix of client order ids.
    pub order_id_prefix: String,
}

impl Default for PegConfig {
    fn default() -> Self {
        Self {
            offset: Money::new(dec!(0.01)),
            order_id_prefix: DEFAULT_ORDER_ID_PREFIX.to_string(),
        }
    }
}
