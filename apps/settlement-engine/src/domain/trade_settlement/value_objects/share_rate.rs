//! Recorded share rate.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Money, Symbol, Timestamp};

/// Price of one share of a symbol as recorded at a point in time.
///
/// Immutable once recorded. The latest rate for a symbol is the one with the
/// greatest timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRate {
    symbol: Symbol,
    rate: Money,
    timestamp: Timestamp,
}

impl ShareRate {
    /// Create a share rate.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is invalid or the rate is not positive.
    pub fn new(symbol: Symbol, rate: Money, timestamp: Timestamp) -> Result<Self, DomainError> {
        symbol.validate()?;
        rate.validate_as_rate()?;
        Ok(Self {
            symbol,
            rate,
            timestamp,
        })
    }

    /// Get the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the price per share.
    #[must_use]
    pub const fn rate(&self) -> Money {
        self.rate
    }

    /// Get the recording time.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Whether this rate was recorded after `other`.
    #[must_use]
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.timestamp > other.timestamp
    }
}
