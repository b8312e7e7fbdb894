//! Simulated market configuration.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Parameters of the random walk driving the simulated venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Starting best bid.
    pub initial_bid: Money,
    /// Fixed ask minus bid.
    pub spread: Money,
    /// Price increment of one step.
    pub tick: Money,
    /// Random seed.
    pub seed: u64,
    /// Delay between quotes (milliseconds).
    pub step_interval_ms: u64,
    /// Quotes to publish before the session closes.
    pub max_steps: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_bid: Money::new(dec!(1.00)),
            spread: Money::new(dec!(0.01)),
            tick: Money::new(dec!(0.01)),
            seed: 42,
            step_interval_ms: 100,
            max_steps: 1_000,
        }
    }
}
