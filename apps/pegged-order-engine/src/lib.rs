// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::option_if_let_else,
        clippy::items_after_statements
    )
)]

//! Pegged Order Engine - Rust Core Library
//!
//! Keeps one working limit order pegged to the best bid/offer of an
//! instrument. The order is priced at the passive side of the market
//! adjusted by an offset, cancelled and resubmitted whenever the market
//! drifts, and its filled quantity is carried across every resubmission.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure business logic (aggregates, value objects, events)
//!   - `shared`: Money, Quantity, Symbol, identifiers, timestamps
//!   - `order_execution`: Order fields, side, status, execution reports
//!   - `pegging`: The `PeggedOrder` state machine and its pricer
//!
//! - **Application**: Ports and orchestration
//!   - `ports`: Interfaces for external systems (`OrderGatewayPort`, `QuoteFeedPort`)
//!   - `services`: `PeggedOrderEngine`, the event loop driving the aggregate
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `simulation`: In-memory venue and random-walk quote source
//!
//! - **Config**: YAML configuration with environment interpolation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Ports and the engine service.
pub mod application;

/// Infrastructure layer - Adapters.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order_execution::{ExecutionReport, OrderFields, OrderStatus, Side, TimeInForce};
pub use domain::pegging::{BboQuote, PegCommand, PegError, PegEvent, PegOffset, PegState, PeggedOrder};
pub use domain::shared::{Money, OrderId, Quantity, Symbol};

// Application re-exports
pub use application::ports::{GatewayError, OrderGatewayPort, QuoteFeedError, QuoteFeedPort};
pub use application::services::{EngineConfig, EngineError, PegCompletion, PeggedOrderEngine};

// Infrastructure re-exports
pub use infrastructure::simulation::{RandomWalkQuotes, SimulatedVenue};
