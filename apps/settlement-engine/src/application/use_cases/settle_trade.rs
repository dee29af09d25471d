//! Settle Trade Use Case
//!
//! Resolves the latest share rate and the portfolio concurrently, checks the
//! rejection rules in a fixed order, prices the trade and appends it to the
//! ledger.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::dto::TradeRequest;
use crate::application::ports::{
    PortfolioSourceError, PortfolioSourcePort, RateSourceError, RateSourcePort,
};
use crate::application::services::PositionLocks;
use crate::domain::shared::DomainError;
use crate::domain::trade_settlement::{
    LedgerError, NewTrade, PositionCalculator, PositionKey, RejectionReason, ShareRate, Trade,
    TradeAction, TradeLedger,
};

/// Default bound on each collaborator lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Settlement failure.
///
/// `Rejected` carries the three business outcomes. Every other variant is an
/// infrastructure or arithmetic fault, not a business rejection.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    /// The trade was refused by a business rule.
    #[error("{0}")]
    Rejected(#[from] RejectionReason),

    /// The rate source failed.
    #[error(transparent)]
    RateSource(#[from] RateSourceError),

    /// The portfolio source failed.
    #[error(transparent)]
    PortfolioSource(#[from] PortfolioSourceError),

    /// The trade ledger failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The trade could not be priced.
    #[error("pricing failed: {0}")]
    Pricing(#[from] DomainError),

    /// A lookup did not complete within the configured bound.
    #[error("{lookup} lookup timed out after {}ms", .timeout.as_millis())]
    LookupTimedOut {
        /// Which lookup timed out.
        lookup: &'static str,
        /// The bound that elapsed.
        timeout: Duration,
    },
}

impl SettlementError {
    /// The business rejection, if this is one.
    #[must_use]
    pub const fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Use case for settling a single trade.
pub struct SettleTradeUseCase<R, P, L>
where
    R: RateSourcePort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    rates: Arc<R>,
    portfolios: Arc<P>,
    ledger: Arc<L>,
    locks: PositionLocks,
    lookup_timeout: Duration,
}

impl<R, P, L> SettleTradeUseCase<R, P, L>
where
    R: RateSourcePort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    /// Create a new SettleTradeUseCase.
    pub fn new(rates: Arc<R>, portfolios: Arc<P>, ledger: Arc<L>) -> Self {
        Self {
            rates,
            portfolios,
            ledger,
            locks: PositionLocks::new(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Set the bound applied to each lookup.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::Rejected` for unknown symbols, unknown
    /// portfolios and oversized sells, or an infrastructure variant if a
    /// collaborator fails or times out. Nothing is appended on error.
    #[tracing::instrument(
        name = "settle_trade",
        skip(self, request),
        fields(
            portfolio_id = %request.portfolio_id,
            symbol = %request.symbol,
            action = %request.action,
            quantity = %request.quantity,
        )
    )]
    pub async fn execute(&self, request: TradeRequest) -> Result<Trade, SettlementError> {
        let result = self.settle(&request).await;

        match &result {
            Ok(trade) => tracing::info!(
                trade_id = %trade.id(),
                price = %trade.price(),
                "Trade settled"
            ),
            Err(SettlementError::Rejected(reason)) => tracing::info!(
                reason = reason.summary(),
                detail = %reason,
                "Trade rejected"
            ),
            Err(e) => tracing::error!(error = %e, "Settlement failed"),
        }

        result
    }

    async fn settle(&self, request: &TradeRequest) -> Result<Trade, SettlementError> {
        let started = Instant::now();
        let (rate, portfolio) = tokio::join!(
            self.bounded("rate", self.rates.latest_rate(&request.symbol)),
            self.bounded(
                "portfolio",
                self.portfolios.find_portfolio(request.portfolio_id)
            ),
        );
        tracing::debug!(
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Lookups resolved"
        );

        // Symbol is checked before portfolio regardless of completion order.
        let rate = rate?.ok_or_else(|| RejectionReason::UnknownSymbol {
            symbol: request.symbol.clone(),
        })?;
        let portfolio = portfolio?.ok_or(RejectionReason::UnknownPortfolio {
            portfolio_id: request.portfolio_id,
        })?;
        tracing::debug!(portfolio = portfolio.name(), rate = %rate.rate(), "Pricing trade");

        match request.action {
            TradeAction::Buy => self.buy(request, &rate).await,
            TradeAction::Sell => self.sell(request, &rate).await,
        }
    }

    async fn buy(
        &self,
        request: &TradeRequest,
        rate: &ShareRate,
    ) -> Result<Trade, SettlementError> {
        let trade =
            NewTrade::priced(request.portfolio_id, TradeAction::Buy, request.quantity, rate)?;
        Ok(self.ledger.append(trade).await?)
    }

    async fn sell(
        &self,
        request: &TradeRequest,
        rate: &ShareRate,
    ) -> Result<Trade, SettlementError> {
        let _guard = self
            .locks
            .lock(PositionKey::new(request.portfolio_id, request.symbol.clone()))
            .await;

        let history = self
            .ledger
            .trades_for(request.portfolio_id, &request.symbol)
            .await?;
        let available = PositionCalculator::net_position(&history);
        PositionCalculator::ensure_covers(available, request.quantity)?;

        let trade =
            NewTrade::priced(request.portfolio_id, TradeAction::Sell, request.quantity, rate)?;
        Ok(self.ledger.append(trade).await?)
    }

    async fn bounded<T, E>(
        &self,
        lookup: &'static str,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, SettlementError>
    where
        SettlementError: From<E>,
    {
        let timeout = self.lookup_timeout;
        match tokio::time::timeout(timeout, fut).await {
            Ok(result) => result.map_err(SettlementError::from),
            Err(_) => Err(SettlementError::LookupTimedOut { lookup, timeout }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{Money, PortfolioId, Quantity, Symbol, Timestamp, TradeId};
    use crate::domain::trade_settlement::{NetPosition, Portfolio};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::task::JoinSet;

    // Mock rate source: latest = greatest timestamp among matching symbols
    struct MockRates {
        rates: Vec<ShareRate>,
        hang: bool,
        fail: bool,
    }

    impl MockRates {
        fn with(rates: Vec<ShareRate>) -> Self {
            Self {
                rates,
                hang: false,
                fail: false,
            }
        }
    }

    #[async_trait]
    impl RateSourcePort for MockRates {
        async fn latest_rate(
            &self,
            symbol: &Symbol,
        ) -> Result<Option<ShareRate>, RateSourceError> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            if self.fail {
                return Err(RateSourceError::ConnectionError {
                    message: "rate store down".to_string(),
                });
            }
            Ok(self
                .rates
                .iter()
                .filter(|r| r.symbol() == symbol)
                .max_by_key(|r| r.timestamp())
                .cloned())
        }
    }

    // Mock portfolio source
    struct MockPortfolios {
        portfolios: Vec<Portfolio>,
        hang: bool,
    }

    #[async_trait]
    impl PortfolioSourcePort for MockPortfolios {
        async fn find_portfolio(
            &self,
            id: PortfolioId,
        ) -> Result<Option<Portfolio>, PortfolioSourceError> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            Ok(self.portfolios.iter().find(|p| p.id() == id).cloned())
        }
    }

    // Mock ledger that yields between read and write to expose races
    #[derive(Default)]
    struct MockLedger {
        trades: RwLock<Vec<Trade>>,
        appends: AtomicUsize,
        fail_appends: bool,
    }

    impl MockLedger {
        fn len(&self) -> usize {
            self.trades.read().unwrap().len()
        }
    }

    #[async_trait]
    impl TradeLedger for MockLedger {
        async fn trades_for(
            &self,
            portfolio_id: PortfolioId,
            symbol: &Symbol,
        ) -> Result<Vec<Trade>, LedgerError> {
            let found: Vec<Trade> = self
                .trades
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.portfolio_id() == portfolio_id && t.symbol() == symbol)
                .cloned()
                .collect();
            tokio::task::yield_now().await;
            Ok(found)
        }

        async fn trades_for_portfolio(
            &self,
            portfolio_id: PortfolioId,
        ) -> Result<Vec<Trade>, LedgerError> {
            Ok(self
                .trades
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.portfolio_id() == portfolio_id)
                .cloned()
                .collect())
        }

        async fn append(&self, trade: NewTrade) -> Result<Trade, LedgerError> {
            if self.fail_appends {
                return Err(LedgerError::Unavailable {
                    message: "disk full".to_string(),
                });
            }
            let id = self.appends.fetch_add(1, Ordering::SeqCst) + 1;
            let trade = trade.with_id(TradeId::new(i64::try_from(id).unwrap()));
            self.trades.write().unwrap().push(trade.clone());
            Ok(trade)
        }
    }

    fn rate(symbol: &str, amount: Decimal, at: &str) -> ShareRate {
        ShareRate::new(
            Symbol::new(symbol),
            Money::new(amount),
            Timestamp::parse(at).unwrap(),
        )
        .unwrap()
    }

    fn rates_for_a() -> Vec<ShareRate> {
        vec![
            rate("A", dec!(1.5), "2018-08-17T10:00:00Z"),
            rate("A", dec!(1.0), "2018-08-17T09:00:00Z"),
        ]
    }

    fn portfolio_one() -> MockPortfolios {
        MockPortfolios {
            portfolios: vec![Portfolio::new(PortfolioId::new(1), "John Doe").unwrap()],
            hang: false,
        }
    }

    fn request(portfolio: i32, symbol: &str, action: TradeAction, qty: u32) -> TradeRequest {
        TradeRequest {
            portfolio_id: PortfolioId::new(portfolio),
            symbol: Symbol::new(symbol),
            action,
            quantity: Quantity::new(qty).unwrap(),
        }
    }

    type TestUseCase = SettleTradeUseCase<MockRates, MockPortfolios, MockLedger>;

    fn use_case(ledger: Arc<MockLedger>) -> TestUseCase {
        SettleTradeUseCase::new(
            Arc::new(MockRates::with(rates_for_a())),
            Arc::new(portfolio_one()),
            ledger,
        )
    }

    #[tokio::test]
    async fn buy_is_priced_at_latest_rate() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        let trade = uc
            .execute(request(1, "A", TradeAction::Buy, 10))
            .await
            .unwrap();

        assert_eq!(trade.price().amount(), dec!(15.0));
        assert_eq!(trade.quantity().shares(), 10);
        assert_eq!(trade.action(), TradeAction::Buy);
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn overflowing_price_is_a_fault_not_a_rejection() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(23), 0);
        let ledger = Arc::new(MockLedger::default());
        let uc = SettleTradeUseCase::new(
            Arc::new(MockRates::with(vec![rate("A", huge, "2018-08-17T10:00:00Z")])),
            Arc::new(portfolio_one()),
            Arc::clone(&ledger),
        );

        let err = uc
            .execute(request(1, "A", TradeAction::Buy, 1_000_000))
            .await
            .unwrap_err();

        assert!(matches!(err, SettlementError::Pricing(_)));
        assert!(err.rejection().is_none());
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn sell_lifecycle_matches_ledger_history() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        uc.execute(request(1, "A", TradeAction::Buy, 10))
            .await
            .unwrap();

        let err = uc
            .execute(request(1, "A", TradeAction::Sell, 1000))
            .await
            .unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&RejectionReason::InsufficientPosition {
                available: NetPosition::new(10),
                requested: Quantity::new(1000).unwrap(),
            })
        );
        assert_eq!(ledger.len(), 1);

        let trade = uc
            .execute(request(1, "A", TradeAction::Sell, 1))
            .await
            .unwrap();
        assert_eq!(trade.price().amount(), dec!(1.5));
        assert_eq!(trade.action(), TradeAction::Sell);
        assert_eq!(ledger.len(), 2);

        let history = ledger
            .trades_for(PortfolioId::new(1), &Symbol::new("A"))
            .await
            .unwrap();
        assert_eq!(
            PositionCalculator::net_position(&history),
            NetPosition::new(9)
        );
    }

    #[tokio::test]
    async fn sell_of_entire_position_succeeds() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        uc.execute(request(1, "A", TradeAction::Buy, 5))
            .await
            .unwrap();
        uc.execute(request(1, "A", TradeAction::Sell, 5))
            .await
            .unwrap();

        let err = uc
            .execute(request(1, "A", TradeAction::Sell, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::Rejected(RejectionReason::InsufficientPosition { .. })
        ));
    }

    #[tokio::test]
    async fn sell_without_history_is_rejected() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        let err = uc
            .execute(request(1, "A", TradeAction::Sell, 1))
            .await
            .unwrap_err();
        assert_eq!(err.rejection().map(RejectionReason::summary), Some("not enough shares"));
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn unknown_symbol_wins_over_unknown_portfolio() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        let err = uc
            .execute(request(999, "Z", TradeAction::Buy, 1))
            .await
            .unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&RejectionReason::UnknownSymbol {
                symbol: Symbol::new("Z")
            })
        );
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn unknown_portfolio_is_rejected() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        let err = uc
            .execute(request(999, "A", TradeAction::Buy, 1))
            .await
            .unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&RejectionReason::UnknownPortfolio {
                portfolio_id: PortfolioId::new(999)
            })
        );
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn symbols_match_case_sensitively() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        let err = uc
            .execute(request(1, "a", TradeAction::Buy, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::Rejected(RejectionReason::UnknownSymbol { .. })
        ));
    }

    #[tokio::test]
    async fn same_request_twice_appends_twice() {
        let ledger = Arc::new(MockLedger::default());
        let uc = use_case(Arc::clone(&ledger));

        let first = uc
            .execute(request(1, "A", TradeAction::Buy, 2))
            .await
            .unwrap();
        let second = uc
            .execute(request(1, "A", TradeAction::Buy, 2))
            .await
            .unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_sells_never_oversell() {
        let ledger = Arc::new(MockLedger::default());
        let uc = Arc::new(use_case(Arc::clone(&ledger)));

        uc.execute(request(1, "A", TradeAction::Buy, 10))
            .await
            .unwrap();

        let mut tasks = JoinSet::new();
        for _ in 0..8 {
            let uc = Arc::clone(&uc);
            tasks.spawn(async move { uc.execute(request(1, "A", TradeAction::Sell, 3)).await });
        }

        let mut settled = 0;
        let mut rejected = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap() {
                Ok(_) => settled += 1,
                Err(SettlementError::Rejected(RejectionReason::InsufficientPosition {
                    ..
                })) => rejected += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(settled, 3);
        assert_eq!(rejected, 5);

        let history = ledger
            .trades_for(PortfolioId::new(1), &Symbol::new("A"))
            .await
            .unwrap();
        assert_eq!(
            PositionCalculator::net_position(&history),
            NetPosition::new(1)
        );
    }

    #[tokio::test]
    async fn hanging_rate_lookup_times_out() {
        let ledger = Arc::new(MockLedger::default());
        let rates = MockRates {
            hang: true,
            ..MockRates::with(rates_for_a())
        };
        let uc = SettleTradeUseCase::new(
            Arc::new(rates),
            Arc::new(portfolio_one()),
            Arc::clone(&ledger),
        )
        .with_lookup_timeout(Duration::from_millis(50));

        let err = uc
            .execute(request(1, "A", TradeAction::Buy, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::LookupTimedOut { lookup: "rate", .. }
        ));
        assert!(err.rejection().is_none());
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn hanging_portfolio_lookup_times_out() {
        let ledger = Arc::new(MockLedger::default());
        let portfolios = MockPortfolios {
            hang: true,
            ..portfolio_one()
        };
        let uc = SettleTradeUseCase::new(
            Arc::new(MockRates::with(rates_for_a())),
            Arc::new(portfolios),
            Arc::clone(&ledger),
        )
        .with_lookup_timeout(Duration::from_millis(50));

        let err = uc
            .execute(request(1, "A", TradeAction::Buy, 1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("portfolio lookup timed out after 50ms"));
    }

    #[tokio::test]
    async fn rate_source_failure_is_not_a_rejection() {
        let ledger = Arc::new(MockLedger::default());
        let rates = MockRates {
            fail: true,
            ..MockRates::with(rates_for_a())
        };
        let uc = SettleTradeUseCase::new(
            Arc::new(rates),
            Arc::new(portfolio_one()),
            Arc::clone(&ledger),
        );

        let err = uc
            .execute(request(1, "A", TradeAction::Buy, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, SettlementError::RateSource(_)));
        assert!(err.rejection().is_none());
    }

    #[tokio::test]
    async fn ledger_failure_propagates() {
        let ledger = Arc::new(MockLedger {
            fail_appends: true,
            ..MockLedger::default()
        });
        let uc = use_case(Arc::clone(&ledger));

        let err = uc
            .execute(request(1, "A", TradeAction::Buy, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, SettlementError::Ledger(_)));
    }
}
