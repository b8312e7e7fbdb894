//! Pegging Aggregates

mod pegged_order;

pub use pegged_order::{DEFAULT_ORDER_ID_PREFIX, PeggedOrder};
