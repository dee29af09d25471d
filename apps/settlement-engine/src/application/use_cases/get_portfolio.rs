//! Get Portfolio Use Case

use std::sync::Arc;

use super::QueryError;
use crate::application::dto::PortfolioDto;
use crate::application::ports::PortfolioSourcePort;
use crate::domain::shared::PortfolioId;
use crate::domain::trade_settlement::{PositionCalculator, TradeLedger};

/// Use case for reading a portfolio with its trades and net positions.
pub struct GetPortfolioUseCase<P, L>
where
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    portfolios: Arc<P>,
    ledger: Arc<L>,
}

impl<P, L> GetPortfolioUseCase<P, L>
where
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    /// Create a new GetPortfolioUseCase.
    pub const fn new(portfolios: Arc<P>, ledger: Arc<L>) -> Self {
        Self { portfolios, ledger }
    }

    /// Execute the use case. Returns `None` if the portfolio is unknown.
    pub async fn execute(
        &self,
        portfolio_id: PortfolioId,
    ) -> Result<Option<PortfolioDto>, QueryError> {
        let Some(portfolio) = self.portfolios.find_portfolio(portfolio_id).await? else {
            return Ok(None);
        };

        let mut trades = self.ledger.trades_for_portfolio(portfolio_id).await?;
        trades.sort_by_key(|t| t.id());
        let positions = PositionCalculator::positions_by_symbol(&trades);

        Ok(Some(PortfolioDto::new(&portfolio, &trades, &positions)))
    }
}
