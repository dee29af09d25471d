//! Shared Value Objects
//!
//! Immutable domain types used across the settlement context.
//! Value objects are compared by value, not identity.

mod identifiers;
mod money;
mod quantity;
mod symbol;
mod timestamp;

pub use identifiers::{PortfolioId, TradeId};
pub use money::Money;
pub use quantity::Quantity;
pub use symbol::Symbol;
pub use timestamp::Timestamp;
