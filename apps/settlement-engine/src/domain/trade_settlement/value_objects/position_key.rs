//! Key identifying one position in the ledger.

use std::fmt;

use crate::domain::shared::{PortfolioId, Symbol};

/// A (portfolio, symbol) pair. Net positions are tracked per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    /// Owning portfolio.
    pub portfolio_id: PortfolioId,
    /// Share symbol.
    pub symbol: Symbol,
}

impl PositionKey {
    /// Create a new key.
    #[must_use]
    pub const fn new(portfolio_id: PortfolioId, symbol: Symbol) -> Self {
        Self {
            portfolio_id,
            symbol,
        }
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.portfolio_id, self.symbol)
    }
}
