//! Pegging errors.

use std::fmt;

use crate::domain::shared::{DomainError, OrderId};

/// Errors raised by the pegged order aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PegError {
    /// Peg offset below zero.
    NegativeOffset {
        /// Offending offset.
        offset: String,
    },

    /// Order fields failed validation.
    InvalidOrder(DomainError),

    /// An execution would push the filled quantity above the requested one.
    Overfill {
        /// Order that reported the execution.
        order_id: OrderId,
        /// Quantity of the execution.
        fill_quantity: String,
        /// Quantity filled before the execution.
        filled_quantity: String,
        /// Total requested quantity.
        requested_quantity: String,
    },
}

impl fmt::Display for PegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeOffset { offset } => {
                write!(f, "Peg offset cannot be negative: {offset}")
            }
            Self::InvalidOrder(err) => write!(f, "Invalid order fields: {err}"),
            Self::Overfill {
                order_id,
                fill_quantity,
                filled_quantity,
                requested_quantity,
            } => {
                write!(
                    f,
                    "Fill of {fill_quantity} on {order_id} exceeds requested quantity \
                     (filled: {filled_quantity}, requested: {requested_quantity})"
                )
            }
        }
    }
}

impl std::error::Error for PegError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidOrder(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomainError> for PegError {
    fn from(err: DomainError) -> Self {
        Self::InvalidOrder(err)
    }
}
