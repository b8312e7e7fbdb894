//! Working order currently outstanding at the gateway.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, OrderId, Quantity};

/// The single order a pegged order has outstanding.
///
/// Replaced on every reprice. `quantity` is the remaining quantity at the
/// time of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingOrder {
    /// Client order id the gateway reports on.
    pub order_id: OrderId,
    /// Submitted limit price.
    pub price: Money,
    /// Submitted quantity.
    pub quantity: Quantity,
}

impl WorkingOrder {
    /// Create a working order.
    #[must_use]
    pub const fn new(order_id: OrderId, price: Money, quantity: Quantity) -> Self {
        Self {
            order_id,
            price,
            quantity,
        }
    }
}
