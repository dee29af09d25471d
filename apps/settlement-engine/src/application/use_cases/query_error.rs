//! Errors shared by the read-side use cases.

use crate::application::ports::{PortfolioSourceError, RateSourceError};
use crate::domain::trade_settlement::LedgerError;

/// A read-side query could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The rate source failed.
    #[error(transparent)]
    RateSource(#[from] RateSourceError),

    /// The portfolio source failed.
    #[error(transparent)]
    PortfolioSource(#[from] PortfolioSourceError),

    /// The trade ledger failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
