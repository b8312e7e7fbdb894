//! Random walk quote generator.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::SimulatedVenue;
use crate::domain::pegging::BboQuote;
use crate::domain::shared::{Money, Symbol};

/// Seeded random walk of top-of-book quotes with a fixed spread.
///
/// Each step moves the bid by -1, 0 or +1 ticks. The bid never drops below
/// one tick, so the book stays two-sided.
#[derive(Debug, Clone)]
pub struct RandomWalkQuotes {
    symbol: Symbol,
    bid: Money,
    spread: Money,
    tick: Money,
    rng: StdRng,
}

impl RandomWalkQuotes {
    /// Create a walk starting at `initial_bid`.
    #[must_use]
    pub fn new(symbol: Symbol, initial_bid: Money, spread: Money, tick: Money, seed: u64) -> Self {
        Self {
            symbol,
            bid: initial_bid,
            spread,
            tick,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Quote at the current position of the walk.
    #[must_use]
    pub fn current(&self) -> BboQuote {
        BboQuote::new(self.symbol.clone(), self.bid, self.bid + self.spread)
    }

    /// Advance one step and return the new quote.
    pub fn step(&mut self) -> BboQuote {
        let ticks = self.rng.random_range(-1_i64..=1);
        let moved = self.bid + Money::new(self.tick.amount() * rust_decimal::Decimal::from(ticks));
        self.bid = moved.max(self.tick);
        self.current()
    }

    /// Publish the walk to a venue on a fixed interval.
    ///
    /// The current quote is published first. After `max_steps` further
    /// quotes the venue's session is closed. Stops early on `shutdown`.
    pub fn spawn(
        mut self,
        venue: Arc<SimulatedVenue>,
        interval: Duration,
        max_steps: u64,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            venue.publish_bbo(self.current());
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            for step in 0..max_steps {
                tokio::select! {
                    _ = ticker.tick() => {
                        let quote = self.step();
                        tracing::debug!(
                            step,
                            bid = %quote.bid,
                            ask = %quote.ask,
                            "Publishing simulated quote"
                        );
                        venue.publish_bbo(quote);
                    }
                    () = shutdown.cancelled() => {
                        tracing::info!("Quote simulation shutting down");
                        return;
                    }
                }
            }

            tracing::info!(steps = max_steps, "Quote simulation finished, closing session");
            venue.end_session();
        })
    }
}

impl Iterator for RandomWalkQuotes {
    type Item = BboQuote;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.step())
    }
}
