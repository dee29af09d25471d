//! In-memory adapters for the ledger, rate and portfolio stores.
//!
//! Used by the service binary (seeded from configuration) and by tests.
//! State lives for the lifetime of the process.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{
    PortfolioSourceError, PortfolioSourcePort, RateHistoryPort, RateSourceError, RateSourcePort,
};
use crate::domain::shared::{PortfolioId, Symbol, TradeId};
use crate::domain::trade_settlement::{LedgerError, NewTrade, Portfolio, ShareRate, Trade, TradeLedger};

// ============================================================================
// Trade ledger
// ============================================================================

/// In-memory implementation of `TradeLedger`.
///
/// Trades are kept in append order and ids are assigned sequentially from 1
/// under the same write lock that stores the record.
#[derive(Debug, Default)]
pub struct InMemoryTradeLedger {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of trades in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TradeLedger for InMemoryTradeLedger {
    async fn trades_for(
        &self,
        portfolio_id: PortfolioId,
        symbol: &Symbol,
    ) -> Result<Vec<Trade>, LedgerError> {
        let trades = self.trades.read().unwrap_or_else(PoisonError::into_inner);
        Ok(trades
            .iter()
            .filter(|t| t.portfolio_id() == portfolio_id && t.symbol() == symbol)
            .cloned()
            .collect())
    }

    async fn trades_for_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> Result<Vec<Trade>, LedgerError> {
        let trades = self.trades.read().unwrap_or_else(PoisonError::into_inner);
        Ok(trades
            .iter()
            .filter(|t| t.portfolio_id() == portfolio_id)
            .cloned()
            .collect())
    }

    async fn append(&self, trade: NewTrade) -> Result<Trade, LedgerError> {
        let mut trades = self.trades.write().unwrap_or_else(PoisonError::into_inner);
        let next = i64::try_from(trades.len())
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| LedgerError::Unavailable {
                message: "trade id space exhausted".to_string(),
            })?;

        let trade = trade.with_id(TradeId::new(next));
        trades.push(trade.clone());
        Ok(trade)
    }
}

// ============================================================================
// Share rates
// ============================================================================

/// In-memory share rate store.
///
/// Rates are grouped by exact symbol. When two rates for a symbol carry the
/// same timestamp, the one recorded later is treated as the latest.
#[derive(Debug, Default)]
pub struct InMemoryShareRateRepository {
    rates: RwLock<HashMap<Symbol, Vec<ShareRate>>>,
}

impl InMemoryShareRateRepository {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rate (for seeding and test setup).
    pub fn record(&self, rate: ShareRate) {
        let mut rates = self.rates.write().unwrap_or_else(PoisonError::into_inner);
        rates.entry(rate.symbol().clone()).or_default().push(rate);
    }

    /// Number of distinct symbols with at least one rate.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.rates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl RateSourcePort for InMemoryShareRateRepository {
    async fn latest_rate(&self, symbol: &Symbol) -> Result<Option<ShareRate>, RateSourceError> {
        let rates = self.rates.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rates
            .get(symbol)
            .and_then(|recorded| recorded.iter().max_by_key(|r| r.timestamp()))
            .cloned())
    }
}

#[async_trait]
impl RateHistoryPort for InMemoryShareRateRepository {
    async fn rates_for(&self, symbol: &Symbol) -> Result<Vec<ShareRate>, RateSourceError> {
        let rates = self.rates.read().unwrap_or_else(PoisonError::into_inner);
        let mut history = rates.get(symbol).cloned().unwrap_or_default();
        history.reverse();
        history.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        Ok(history)
    }
}

// ============================================================================
// Portfolios
// ============================================================================

/// In-memory portfolio registry.
#[derive(Debug, Default)]
pub struct InMemoryPortfolioRepository {
    portfolios: RwLock<HashMap<PortfolioId, Portfolio>>,
}

impl InMemoryPortfolioRepository {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a portfolio (for seeding and test setup).
    ///
    /// Replaces any portfolio previously registered under the same id.
    pub fn register(&self, portfolio: Portfolio) {
        let mut portfolios = self
            .portfolios
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        portfolios.insert(portfolio.id(), portfolio);
    }

    /// Number of registered portfolios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.portfolios
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no portfolio is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PortfolioSourcePort for InMemoryPortfolioRepository {
    async fn find_portfolio(
        &self,
        id: PortfolioId,
    ) -> Result<Option<Portfolio>, PortfolioSourceError> {
        let portfolios = self
            .portfolios
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(portfolios.get(&id).cloned())
    }
}
