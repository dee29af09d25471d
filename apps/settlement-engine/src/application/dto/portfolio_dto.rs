//! Portfolio DTOs

use serde::{Deserialize, Serialize};

use super::TradeDto;
use crate::domain::shared::Symbol;
use crate::domain::trade_settlement::{NetPosition, Portfolio, Trade};

/// Net holding in one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    /// Share symbol.
    pub symbol: String,
    /// Signed net shares held.
    pub net_shares: i64,
}

/// DTO representing a portfolio and its trade history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDto {
    /// Portfolio id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Trades ordered by id.
    pub trades: Vec<TradeDto>,
    /// Net positions, ordered by symbol.
    pub positions: Vec<PositionDto>,
}

impl PortfolioDto {
    /// Assemble from a portfolio, its trades and its derived positions.
    #[must_use]
    pub fn new<'a>(
        portfolio: &Portfolio,
        trades: &[Trade],
        positions: impl IntoIterator<Item = (&'a Symbol, &'a NetPosition)>,
    ) -> Self {
        Self {
            id: portfolio.id().value(),
            name: portfolio.name().to_string(),
            trades: trades.iter().map(TradeDto::from_trade).collect(),
            positions: positions
                .into_iter()
                .map(|(symbol, position)| PositionDto {
                    symbol: symbol.to_string(),
                    net_shares: position.shares(),
                })
                .collect(),
        }
    }
}
