//! Domain Layer
//!
//! Pure business logic with no I/O. The pegging context owns the state
//! machine; the order execution context holds the vocabulary shared with
//! the gateway.

pub mod order_execution;
pub mod pegging;
pub mod shared;
