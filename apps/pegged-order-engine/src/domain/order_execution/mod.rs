//! Order Execution Bounded Context
//!
//! The vocabulary shared with the execution gateway: which side an order
//! rests on, the fields it is submitted with, and the execution reports
//! the gateway sends back.

pub mod value_objects;

pub use value_objects::{ExecutionReport, OrderFields, OrderStatus, Side, TimeInForce};
