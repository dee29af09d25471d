//! Money value object for rates and trade prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::shared::{DomainError, Quantity};

/// A monetary amount.
///
/// Represented as a Decimal for precise financial calculations. Display uses
/// 2 decimal places, internal precision is kept as recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Total value of `quantity` units at this per-unit amount.
    ///
    /// No rounding is applied; the product keeps the rate's precision.
    ///
    /// # Errors
    ///
    /// Returns error if the product does not fit in a `Decimal`.
    pub fn times(&self, quantity: Quantity) -> Result<Self, DomainError> {
        self.0
            .checked_mul(quantity.as_decimal())
            .map(Self)
            .ok_or_else(|| DomainError::InvalidValue {
                field: "price".to_string(),
                message: format!("{} x {quantity} overflows", self.0),
            })
    }

    /// Check that this amount can be used as a share rate.
    ///
    /// # Errors
    ///
    /// Returns error if the amount is zero or negative.
    pub fn validate_as_rate(&self) -> Result<(), DomainError> {
        if !self.is_positive() {
            return Err(DomainError::InvalidValue {
                field: "rate".to_string(),
                message: "Share rate must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_new_and_display() {
        let m = Money::new(dec!(150.5));
        assert_eq!(format!("{m}"), "150.50");
    }

    #[test]
    fn money_sign_checks() {
        assert!(!Money::ZERO.is_positive());
        assert!(Money::new(dec!(1)).is_positive());
        assert!(!Money::new(dec!(-1)).is_positive());
    }

    #[test]
    fn money_times_quantity() {
        let rate = Money::new(dec!(1.5));
        let total = rate.times(Quantity::new(10).unwrap()).unwrap();
        assert_eq!(total.amount(), dec!(15.0));
    }

    #[test]
    fn money_times_keeps_precision() {
        let rate = Money::new(dec!(330.125));
        let total = rate.times(Quantity::new(3).unwrap()).unwrap();
        assert_eq!(total.amount(), dec!(990.375));
    }

    #[test]
    fn money_times_overflow_is_an_error() {
        let rate = Money::new(Decimal::MAX);
        let err = rate.times(Quantity::new(2).unwrap()).unwrap_err();
        assert_eq!(err.field(), Some("price"));

        let rate = Money::new(Decimal::from_i128_with_scale(10_i128.pow(23), 0));
        assert!(rate.times(Quantity::new(1_000_000).unwrap()).is_err());
    }

    #[test]
    fn money_ordering() {
        assert!(Money::new(dec!(100)) > Money::new(dec!(50)));
    }

    #[test]
    fn money_validate_as_rate() {
        assert!(Money::new(dec!(0.01)).validate_as_rate().is_ok());
        assert!(Money::ZERO.validate_as_rate().is_err());
        assert!(Money::new(dec!(-2)).validate_as_rate().is_err());
    }

    #[test]
    fn money_serde_roundtrip() {
        let m = Money::new(dec!(330.0));
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }
}
