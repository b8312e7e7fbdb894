//! Simulation Adapters
//!
//! In-memory implementations of the gateway and quote feed ports, used by
//! the binary and by integration tests.

mod random_walk;
mod venue;

pub use random_walk::RandomWalkQuotes;
pub use venue::SimulatedVenue;
