//! Net position held in one symbol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::domain::shared::Quantity;

/// Signed number of shares held: bought minus sold.
///
/// May be zero or negative when the ledger holds more sells than buys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetPosition(i64);

impl NetPosition {
    /// No shares held.
    pub const FLAT: Self = Self(0);

    /// Create a position from a raw share count.
    #[must_use]
    pub const fn new(shares: i64) -> Self {
        Self(shares)
    }

    /// Raw signed share count.
    #[must_use]
    pub const fn shares(&self) -> i64 {
        self.0
    }

    /// Whether a sell of `quantity` shares fits in this position.
    ///
    /// The boundary is inclusive: selling exactly the held amount is allowed.
    #[must_use]
    pub const fn covers(&self, quantity: Quantity) -> bool {
        self.0 >= quantity.as_i64()
    }
}

impl fmt::Display for NetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for NetPosition {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for NetPosition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::FLAT, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_is_inclusive() {
        let position = NetPosition::new(10);
        assert!(position.covers(Quantity::new(9).unwrap()));
        assert!(position.covers(Quantity::new(10).unwrap()));
        assert!(!position.covers(Quantity::new(11).unwrap()));
    }

    #[test]
    fn flat_and_negative_cover_nothing() {
        let one = Quantity::new(1).unwrap();
        assert!(!NetPosition::FLAT.covers(one));
        assert!(!NetPosition::new(-5).covers(one));
    }

    #[test]
    fn sums_signed_shares() {
        let total: NetPosition = [10, -3, 4].into_iter().map(NetPosition::new).sum();
        assert_eq!(total, NetPosition::new(11));
    }
}
