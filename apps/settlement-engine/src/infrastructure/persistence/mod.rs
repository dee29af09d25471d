//! Persistence Adapters
//!
//! Implementations of the ledger trait and the lookup ports.

pub mod in_memory;

pub use in_memory::{InMemoryPortfolioRepository, InMemoryShareRateRepository, InMemoryTradeLedger};
