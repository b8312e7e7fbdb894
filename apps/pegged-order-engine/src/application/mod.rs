//! Application Layer
//!
//! Ports describing the external collaborators and the service that runs
//! a pegged order against them.

pub mod ports;
pub mod services;
