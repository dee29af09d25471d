//! List Trades Use Case

use std::sync::Arc;

use super::QueryError;
use crate::application::dto::TradeDto;
use crate::domain::shared::PortfolioId;
use crate::domain::trade_settlement::TradeLedger;

/// Use case for listing every trade recorded against a portfolio.
pub struct ListTradesUseCase<L>
where
    L: TradeLedger,
{
    ledger: Arc<L>,
}

impl<L> ListTradesUseCase<L>
where
    L: TradeLedger,
{
    /// Create a new ListTradesUseCase.
    pub const fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Execute the use case. Unknown portfolios simply have no trades.
    pub async fn execute(&self, portfolio_id: PortfolioId) -> Result<Vec<TradeDto>, QueryError> {
        let mut trades = self.ledger.trades_for_portfolio(portfolio_id).await?;
        trades.sort_by_key(|t| t.id());
        Ok(trades.iter().map(TradeDto::from_trade).collect())
    }
}
