//! Trade Settlement Bounded Context
//!
//! Records BUY/SELL trades against portfolios at the latest share rate.
//!
//! # Key Concepts
//!
//! - **Trade**: An append-only ledger record, priced at settlement time
//! - **Net Position**: Signed sum of a portfolio's trades in one symbol,
//!   derived from the ledger and never stored
//! - **Rejection Reasons**: The three business outcomes that stop a settlement

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{NewTrade, Portfolio, Trade};
pub use errors::{LedgerError, RejectionReason};
pub use repository::TradeLedger;
pub use services::PositionCalculator;
pub use value_objects::{NetPosition, PositionKey, ShareRate, TradeAction};
