//! Trade Aggregate
//!
//! A trade is priced once, when it is settled, and never changes afterwards.
//! [`NewTrade`] is the priced record before the ledger assigns it an id;
//! [`Trade`] is the stored record.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Money, PortfolioId, Quantity, Symbol, TradeId};
use crate::domain::trade_settlement::value_objects::{
    NetPosition, PositionKey, ShareRate, TradeAction,
};

/// A priced trade that has not yet been appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrade {
    portfolio_id: PortfolioId,
    symbol: Symbol,
    action: TradeAction,
    quantity: Quantity,
    price: Money,
}

impl NewTrade {
    /// Price a trade at `rate`.
    ///
    /// The symbol is taken from the rate so a trade can never be priced
    /// against another symbol's rate. `price = rate × quantity`.
    ///
    /// # Errors
    ///
    /// Returns error if the price overflows.
    pub fn priced(
        portfolio_id: PortfolioId,
        action: TradeAction,
        quantity: Quantity,
        rate: &ShareRate,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            portfolio_id,
            symbol: rate.symbol().clone(),
            action,
            quantity,
            price: rate.rate().times(quantity)?,
        })
    }

    /// Get the portfolio ID.
    #[must_use]
    pub const fn portfolio_id(&self) -> PortfolioId {
        self.portfolio_id
    }

    /// Get the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the action.
    #[must_use]
    pub const fn action(&self) -> TradeAction {
        self.action
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the total price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Attach the ledger-assigned identity.
    #[must_use]
    pub fn with_id(self, id: TradeId) -> Trade {
        Trade {
            id,
            portfolio_id: self.portfolio_id,
            symbol: self.symbol,
            action: self.action,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// A settled trade as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    id: TradeId,
    portfolio_id: PortfolioId,
    symbol: Symbol,
    action: TradeAction,
    quantity: Quantity,
    price: Money,
}

impl Trade {
    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the trade ID.
    #[must_use]
    pub const fn id(&self) -> TradeId {
        self.id
    }

    /// Get the portfolio ID.
    #[must_use]
    pub const fn portfolio_id(&self) -> PortfolioId {
        self.portfolio_id
    }

    /// Get the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the action.
    #[must_use]
    pub const fn action(&self) -> TradeAction {
        self.action
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the total price paid or received.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    // ========================================================================
    // Position
    // ========================================================================

    /// This trade's contribution to its position: +quantity for BUY,
    /// -quantity for SELL.
    #[must_use]
    pub const fn position_delta(&self) -> NetPosition {
        NetPosition::new(self.action.sign() * self.quantity.as_i64())
    }

    /// The position this trade belongs to.
    #[must_use]
    pub fn position_key(&self) -> PositionKey {
        PositionKey::new(self.portfolio_id, self.symbol.clone())
    }
}
