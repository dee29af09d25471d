//! Portfolio Source Port (Driven Port)
//!
//! Read access to registered portfolios.

use async_trait::async_trait;

use crate::domain::shared::PortfolioId;
use crate::domain::trade_settlement::Portfolio;

/// Portfolio source error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortfolioSourceError {
    /// Connection error.
    #[error("Portfolio source connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },
}

/// Port for resolving portfolios by id.
#[async_trait]
pub trait PortfolioSourcePort: Send + Sync {
    /// Find a portfolio. Returns `None` if no portfolio has this id.
    async fn find_portfolio(
        &self,
        id: PortfolioId,
    ) -> Result<Option<Portfolio>, PortfolioSourceError>;
}
