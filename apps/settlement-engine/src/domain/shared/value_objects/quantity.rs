//! Quantity value object for share counts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A strictly positive number of whole shares.
///
/// Construction is fallible so that a `Quantity` in hand is always tradeable.
/// Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Create a new Quantity.
    ///
    /// # Errors
    ///
    /// Returns error if `shares` is zero.
    pub fn new(shares: u32) -> Result<Self, DomainError> {
        if shares == 0 {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: "Quantity must be positive".to_string(),
            });
        }
        Ok(Self(shares))
    }

    /// Create a Quantity from a signed integer, as received on the wire.
    ///
    /// # Errors
    ///
    /// Returns error if `shares` is not positive or does not fit in a `u32`.
    pub fn from_i64(shares: i64) -> Result<Self, DomainError> {
        let shares = u32::try_from(shares).map_err(|_| DomainError::InvalidValue {
            field: "quantity".to_string(),
            message: if shares <= 0 {
                "Quantity must be positive".to_string()
            } else {
                "Quantity is out of range".to_string()
            },
        })?;
        Self::new(shares)
    }

    /// Number of shares.
    #[must_use]
    pub const fn shares(&self) -> u32 {
        self.0
    }

    /// Number of shares widened for signed position arithmetic.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    /// Number of shares as a Decimal, for pricing.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_new_and_display() {
        let q = Quantity::new(100).unwrap();
        assert_eq!(q.shares(), 100);
        assert_eq!(format!("{q}"), "100");
    }

    #[test]
    fn quantity_rejects_zero() {
        assert!(Quantity::new(0).is_err());
    }

    #[test]
    fn quantity_accepts_large_orders() {
        assert_eq!(Quantity::new(2_000_000).unwrap().shares(), 2_000_000);
        assert_eq!(Quantity::from_i64(i64::from(u32::MAX)).unwrap().shares(), u32::MAX);
    }

    #[test]
    fn quantity_from_i64() {
        assert_eq!(Quantity::from_i64(5).unwrap().shares(), 5);

        let err = Quantity::from_i64(-3).unwrap_err();
        assert!(err.to_string().contains("positive"));

        let err = Quantity::from_i64(i64::MAX).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn quantity_conversions() {
        let q = Quantity::new(7).unwrap();
        assert_eq!(q.as_i64(), 7);
        assert_eq!(q.as_decimal(), Decimal::from(7));
    }

    #[test]
    fn quantity_serde_checks_value() {
        let q: Quantity = serde_json::from_str("10").unwrap();
        assert_eq!(q.shares(), 10);
        assert_eq!(serde_json::to_string(&q).unwrap(), "10");

        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
