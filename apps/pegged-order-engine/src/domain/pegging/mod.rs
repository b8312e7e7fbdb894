//! Pegging Bounded Context
//!
//! Keeps a single limit order resting at a fixed offset from the best
//! price on its own side of the book, canceling and resubmitting it when
//! the market moves, until the requested quantity is executed or the
//! order is rejected.
//!
//! # Key Concepts
//!
//! - **Anchor**: best bid for a bid order, best ask for an ask order
//! - **Target**: anchor moved away from the spread by the offset
//! - **Drift**: the target no longer equals the working order's price
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut order = PeggedOrder::new(fields, offset)?;
//! for event in events {
//!     for command in order.apply(event)? {
//!         // submit or cancel at the gateway
//!     }
//! }
//! ```

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;

pub use aggregate::{DEFAULT_ORDER_ID_PREFIX, PeggedOrder};
pub use errors::PegError;
pub use events::{OrderSubmission, PegCommand, PegEvent};
pub use services::PegPricer;
pub use value_objects::{BboQuote, PegOffset, PegState, WorkingOrder};
