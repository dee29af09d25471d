//! Settlement rejections and ledger errors.

use std::fmt;

use super::value_objects::NetPosition;
use crate::domain::shared::{PortfolioId, Quantity, Symbol};

/// Business outcomes that stop a settlement.
///
/// These are expected results, returned as values. They never indicate an
/// infrastructure fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// No share rate has been recorded for the symbol.
    UnknownSymbol {
        /// Requested symbol.
        symbol: Symbol,
    },

    /// No portfolio is registered under the id.
    UnknownPortfolio {
        /// Requested portfolio.
        portfolio_id: PortfolioId,
    },

    /// A SELL asks for more shares than the portfolio holds.
    InsufficientPosition {
        /// Net shares held before the sell.
        available: NetPosition,
        /// Shares the sell asked for.
        requested: Quantity,
    },
}

impl RejectionReason {
    /// Short, stable phrase for the rejection.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::UnknownSymbol { .. } => "no symbol",
            Self::UnknownPortfolio { .. } => "no portfolio",
            Self::InsufficientPosition { .. } => "not enough shares",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol { symbol } => {
                write!(f, "No share rate registered for symbol {symbol}")
            }
            Self::UnknownPortfolio { portfolio_id } => {
                write!(f, "Portfolio not found: {portfolio_id}")
            }
            Self::InsufficientPosition {
                available,
                requested,
            } => {
                write!(
                    f,
                    "Insufficient position: requested {requested} shares, available {available}"
                )
            }
        }
    }
}

impl std::error::Error for RejectionReason {}

/// Errors raised by a trade ledger implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The backing store could not be reached or failed mid-operation.
    Unavailable {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { message } => write!(f, "Trade ledger unavailable: {message}"),
        }
    }
}

impl std::error::Error for LedgerError {}
