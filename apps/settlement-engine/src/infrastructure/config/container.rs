//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{PortfolioSourcePort, RateHistoryPort, RateSourcePort};
use crate::application::use_cases::{
    DEFAULT_LOOKUP_TIMEOUT, GetPortfolioUseCase, ListTradesUseCase, QueryShareRatesUseCase,
    SettleTradeUseCase,
};
use crate::config::SeedConfig;
use crate::domain::shared::DomainError;
use crate::domain::trade_settlement::TradeLedger;
use crate::infrastructure::http::AppState;
use crate::infrastructure::persistence::{
    InMemoryPortfolioRepository, InMemoryShareRateRepository, InMemoryTradeLedger,
};

/// Container wired with the in-memory adapters.
pub type InMemoryContainer =
    Container<InMemoryShareRateRepository, InMemoryPortfolioRepository, InMemoryTradeLedger>;

/// Dependency injection container.
///
/// Holds the rate source, portfolio source and trade ledger, and builds use
/// cases on top of them.
pub struct Container<R, P, L>
where
    R: RateSourcePort + RateHistoryPort + 'static,
    P: PortfolioSourcePort + 'static,
    L: TradeLedger + 'static,
{
    rates: Arc<R>,
    portfolios: Arc<P>,
    ledger: Arc<L>,
    lookup_timeout: Duration,
}

impl<R, P, L> Container<R, P, L>
where
    R: RateSourcePort + RateHistoryPort + 'static,
    P: PortfolioSourcePort + 'static,
    L: TradeLedger + 'static,
{
    /// Create a new container with all dependencies.
    pub const fn new(rates: Arc<R>, portfolios: Arc<P>, ledger: Arc<L>) -> Self {
        Self {
            rates,
            portfolios,
            ledger,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Override the per-lookup timeout used by settlement.
    #[must_use]
    pub const fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Get the rate source.
    pub fn rates(&self) -> Arc<R> {
        Arc::clone(&self.rates)
    }

    /// Get the portfolio source.
    pub fn portfolios(&self) -> Arc<P> {
        Arc::clone(&self.portfolios)
    }

    /// Get the trade ledger.
    pub fn ledger(&self) -> Arc<L> {
        Arc::clone(&self.ledger)
    }

    /// Create a `SettleTradeUseCase`.
    ///
    /// Each instance owns its own position locks, so a process should settle
    /// through a single shared instance.
    pub fn settle_trade_use_case(&self) -> SettleTradeUseCase<R, P, L> {
        SettleTradeUseCase::new(
            Arc::clone(&self.rates),
            Arc::clone(&self.portfolios),
            Arc::clone(&self.ledger),
        )
        .with_lookup_timeout(self.lookup_timeout)
    }

    /// Create a `ListTradesUseCase`.
    pub fn list_trades_use_case(&self) -> ListTradesUseCase<L> {
        ListTradesUseCase::new(Arc::clone(&self.ledger))
    }

    /// Create a `GetPortfolioUseCase`.
    pub fn get_portfolio_use_case(&self) -> GetPortfolioUseCase<P, L> {
        GetPortfolioUseCase::new(Arc::clone(&self.portfolios), Arc::clone(&self.ledger))
    }

    /// Create a `QueryShareRatesUseCase`.
    pub fn share_rates_use_case(&self) -> QueryShareRatesUseCase<R> {
        QueryShareRatesUseCase::new(Arc::clone(&self.rates))
    }

    /// Build the HTTP application state.
    pub fn app_state(&self, version: impl Into<String>) -> AppState<R, P, L> {
        AppState {
            settle_trade: Arc::new(self.settle_trade_use_case()),
            list_trades: Arc::new(self.list_trades_use_case()),
            get_portfolio: Arc::new(self.get_portfolio_use_case()),
            share_rates: Arc::new(self.share_rates_use_case()),
            version: version.into(),
        }
    }
}

impl InMemoryContainer {
    /// Create in-memory stores populated from seed data.
    ///
    /// # Errors
    ///
    /// Returns error if a seeded portfolio or share rate is invalid.
    pub fn in_memory(seed: &SeedConfig) -> Result<Self, DomainError> {
        let rates = InMemoryShareRateRepository::new();
        for rate in &seed.share_rates {
            rates.record(rate.to_share_rate()?);
        }

        let portfolios = InMemoryPortfolioRepository::new();
        for portfolio in &seed.portfolios {
            portfolios.register(portfolio.to_portfolio()?);
        }

        tracing::debug!(
            portfolios = portfolios.len(),
            symbols = rates.symbol_count(),
            "Seeded in-memory stores"
        );

        Ok(Self::new(
            Arc::new(rates),
            Arc::new(portfolios),
            Arc::new(InMemoryTradeLedger::new()),
        ))
    }
}
