//! Quantity value object for order quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use crate::domain::shared::DomainError;

/// A quantity for orders (shares or contracts).
///
/// Represented as a Decimal to handle fractional fills reported by venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a new Quantity from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Quantity from an integer.
    #[must_use]
    pub fn from_i64(amount: i64) -> Self {
        Self(Decimal::new(amount, 0))
    }

    /// Zero quantity.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this quantity is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this quantity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Subtract, flooring the result at zero.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        if rhs.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - rhs.0)
        }
    }

    /// Validate quantity for order submission.
    ///
    /// # Errors
    ///
    /// Returns error if quantity is zero or negative.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.0 <= Decimal::ZERO {
            return Err(DomainError::invalid_value(
                "quantity",
                "Order quantity must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract().is_zero() {
            write!(f, "{}", self.0.trunc())
        } else {
            write!(f, "{}", self.0.normalize())
        }
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quantity_display() {
        assert_eq!(format!("{}", Quantity::from_i64(1000)), "1000");
        assert_eq!(format!("{}", Quantity::new(dec!(100.50))), "100.5");
    }

    #[test]
    fn quantity_arithmetic() {
        let a = Quantity::from_i64(1000);
        let b = Quantity::from_i64(10);

        assert_eq!(a + b, Quantity::from_i64(1010));
        assert_eq!(a - b, Quantity::from_i64(990));

        let mut c = b;
        c += b;
        assert_eq!(c, Quantity::from_i64(20));
    }

    #[test]
    fn quantity_saturating_sub() {
        let a = Quantity::from_i64(10);
        let b = Quantity::from_i64(30);

        assert_eq!(b.saturating_sub(a), Quantity::from_i64(20));
        assert_eq!(a.saturating_sub(b), Quantity::ZERO);
    }

    #[test]
    fn quantity_validate_for_order() {
        assert!(Quantity::ZERO.validate_for_order().is_err());
        assert!(Quantity::from_i64(-10).validate_for_order().is_err());
        assert!(Quantity::from_i64(100).validate_for_order().is_ok());
    }

    #[test]
    fn quantity_ordering() {
        assert!(Quantity::from_i64(100) > Quantity::from_i64(50));
    }

    #[test]
    fn quantity_serde_roundtrip() {
        let q = Quantity::from_i64(100);
        let json = serde_json::to_string(&q).unwrap();
        let parsed: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, q);
    }
}
