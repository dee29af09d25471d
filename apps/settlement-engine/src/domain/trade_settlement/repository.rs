//! Trade Ledger Trait
//!
//! Defines the persistence abstraction for settled trades.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::{NewTrade, Trade};
use super::errors::LedgerError;
use crate::domain::shared::{PortfolioId, Symbol};

/// Append-only store of settled trades.
///
/// Records are never updated or removed once appended.
#[async_trait]
pub trait TradeLedger: Send + Sync {
    /// All trades recorded for a portfolio in one symbol, in any order.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be queried.
    async fn trades_for(
        &self,
        portfolio_id: PortfolioId,
        symbol: &Symbol,
    ) -> Result<Vec<Trade>, LedgerError>;

    /// All trades recorded for a portfolio, ordered by trade id.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be queried.
    async fn trades_for_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> Result<Vec<Trade>, LedgerError>;

    /// Append a trade, assigning its identity.
    ///
    /// # Errors
    ///
    /// Returns error if the record could not be stored.
    async fn append(&self, trade: NewTrade) -> Result<Trade, LedgerError>;
}
