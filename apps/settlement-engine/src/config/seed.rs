//! Startup data for the in-memory stores.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Money, PortfolioId, Symbol, Timestamp};
use crate::domain::trade_settlement::{Portfolio, ShareRate};

/// Portfolios and share rates registered before the server accepts traffic.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeedConfig {
    /// Registered portfolios.
    #[serde(default)]
    pub portfolios: Vec<SeedPortfolio>,
    /// Recorded share rates, in any order.
    #[serde(default)]
    pub share_rates: Vec<SeedShareRate>,
}

/// A portfolio entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPortfolio {
    /// Portfolio id.
    pub id: i32,
    /// Owner name.
    pub name: String,
}

impl SeedPortfolio {
    /// Convert to the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns error if the name is blank.
    pub fn to_portfolio(&self) -> Result<Portfolio, DomainError> {
        Portfolio::new(PortfolioId::new(self.id), self.name.clone())
    }
}

/// A share rate entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedShareRate {
    /// Share symbol.
    pub symbol: String,
    /// Price per share. Quote it in YAML to keep full precision.
    pub rate: Decimal,
    /// Recording time (RFC 3339).
    pub timestamp: Timestamp,
}

impl SeedShareRate {
    /// Convert to the domain value.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is invalid or the rate is not positive.
    pub fn to_share_rate(&self) -> Result<ShareRate, DomainError> {
        ShareRate::new(
            Symbol::new(self.symbol.as_str()),
            Money::new(self.rate),
            self.timestamp,
        )
    }
}
