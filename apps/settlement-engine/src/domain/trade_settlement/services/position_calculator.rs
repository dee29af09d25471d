//! Position Calculator Service
//!
//! Derives net positions from ledger history and checks sell sufficiency.

use std::collections::BTreeMap;

use crate::domain::shared::{Quantity, Symbol};
use crate::domain::trade_settlement::aggregate::Trade;
use crate::domain::trade_settlement::errors::RejectionReason;
use crate::domain::trade_settlement::value_objects::NetPosition;

/// Net position arithmetic over trade history.
pub struct PositionCalculator;

impl PositionCalculator {
    /// Signed sum of the trades' quantities.
    ///
    /// The caller is responsible for passing trades of a single position.
    /// The result does not depend on the order of the trades.
    #[must_use]
    pub fn net_position<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> NetPosition {
        trades.into_iter().map(Trade::position_delta).sum()
    }

    /// Net position per symbol, for trades of a single portfolio.
    #[must_use]
    pub fn positions_by_symbol<'a>(
        trades: impl IntoIterator<Item = &'a Trade>,
    ) -> BTreeMap<Symbol, NetPosition> {
        let mut positions: BTreeMap<Symbol, NetPosition> = BTreeMap::new();
        for trade in trades {
            let entry = positions.entry(trade.symbol().clone()).or_default();
            *entry = *entry + trade.position_delta();
        }
        positions
    }

    /// Check that a sell of `requested` shares fits in `available`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPosition` if `available < requested`.
    pub fn ensure_covers(
        available: NetPosition,
        requested: Quantity,
    ) -> Result<(), RejectionReason> {
        if available.covers(requested) {
            Ok(())
        } else {
            Err(RejectionReason::InsufficientPosition {
                available,
                requested,
            })
        }
    }
}
