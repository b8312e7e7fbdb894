//! Application Services
//!
//! Long-running services that drive domain aggregates through the ports.

mod pegged_order_engine;

pub use pegged_order_engine::{EngineConfig, EngineError, PegCompletion, PeggedOrderEngine};
