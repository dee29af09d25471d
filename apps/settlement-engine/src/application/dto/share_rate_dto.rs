//! Share rate DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;
use crate::domain::trade_settlement::ShareRate;

/// DTO representing a recorded share rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRateDto {
    /// Share symbol.
    pub symbol: String,
    /// Price per share.
    pub rate: Decimal,
    /// Recording time.
    pub timestamp: Timestamp,
}

impl ShareRateDto {
    /// Create from domain ShareRate.
    #[must_use]
    pub fn from_rate(rate: &ShareRate) -> Self {
        Self {
            symbol: rate.symbol().to_string(),
            rate: rate.rate().amount(),
            timestamp: rate.timestamp(),
        }
    }
}
