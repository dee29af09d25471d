//! Query Share Rates Use Case

use std::sync::Arc;

use super::QueryError;
use crate::application::dto::ShareRateDto;
use crate::application::ports::{RateHistoryPort, RateSourcePort};
use crate::domain::shared::Symbol;

/// Use case for browsing recorded share rates.
pub struct QueryShareRatesUseCase<S>
where
    S: RateSourcePort + RateHistoryPort,
{
    rates: Arc<S>,
}

impl<S> QueryShareRatesUseCase<S>
where
    S: RateSourcePort + RateHistoryPort,
{
    /// Create a new QueryShareRatesUseCase.
    pub const fn new(rates: Arc<S>) -> Self {
        Self { rates }
    }

    /// Every rate recorded for the symbol, newest first.
    pub async fn history(&self, symbol: &Symbol) -> Result<Vec<ShareRateDto>, QueryError> {
        let rates = self.rates.rates_for(symbol).await?;
        Ok(rates.iter().map(ShareRateDto::from_rate).collect())
    }

    /// The rate settlement would use right now, if any.
    pub async fn latest(&self, symbol: &Symbol) -> Result<Option<ShareRateDto>, QueryError> {
        let rate = self.rates.latest_rate(symbol).await?;
        Ok(rate.as_ref().map(ShareRateDto::from_rate))
    }
}
