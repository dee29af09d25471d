//! Rate Source Ports (Driven Ports)
//!
//! Read access to recorded share rates. Rates are ingested elsewhere; the
//! settlement engine only reads them.

use async_trait::async_trait;

use crate::domain::shared::Symbol;
use crate::domain::trade_settlement::ShareRate;

/// Rate source error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RateSourceError {
    /// Connection error.
    #[error("Rate source connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Stored data could not be read back as a valid rate.
    #[error("Corrupt rate data for {symbol}: {message}")]
    CorruptData {
        /// Affected symbol.
        symbol: String,
        /// Error details.
        message: String,
    },
}

/// Port for resolving the current price of a share.
#[async_trait]
pub trait RateSourcePort: Send + Sync {
    /// Get the most recently recorded rate for a symbol.
    ///
    /// Symbols match exactly, including case. Returns `None` if no rate has
    /// ever been recorded for the symbol.
    async fn latest_rate(&self, symbol: &Symbol) -> Result<Option<ShareRate>, RateSourceError>;
}

/// Port for browsing recorded rates.
#[async_trait]
pub trait RateHistoryPort: Send + Sync {
    /// Get every rate recorded for a symbol, newest first.
    async fn rates_for(&self, symbol: &Symbol) -> Result<Vec<ShareRate>, RateSourceError>;
}
