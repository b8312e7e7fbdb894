//! Order Execution Value Objects

mod execution_report;
mod order_fields;
mod order_status;
mod side;
mod time_in_force;

pub use execution_report::ExecutionReport;
pub use order_fields::OrderFields;
pub use order_status::OrderStatus;
pub use side::Side;
pub use time_in_force::TimeInForce;
