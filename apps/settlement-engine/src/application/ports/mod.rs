//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driver Ports** (Primary/Inbound): How the world uses our application
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems
//!
//! The trade ledger port lives in the domain as
//! [`TradeLedger`](crate::domain::trade_settlement::TradeLedger).

mod portfolio_source_port;
mod rate_source_port;

pub use portfolio_source_port::{PortfolioSourceError, PortfolioSourcePort};
pub use rate_source_port::{RateHistoryPort, RateSourceError, RateSourcePort};
