//! Pegging Value Objects

mod bbo_quote;
mod offset;
mod state;
mod working_order;

pub use bbo_quote::BboQuote;
pub use offset::PegOffset;
pub use state::PegState;
pub use working_order::WorkingOrder;
