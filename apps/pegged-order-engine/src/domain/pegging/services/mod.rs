//! Pegging Domain Services

mod peg_pricer;

pub use peg_pricer::PegPricer;
