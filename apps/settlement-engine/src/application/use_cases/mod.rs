//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod get_portfolio;
mod list_trades;
mod query_error;
mod query_share_rates;
mod settle_trade;

pub use get_portfolio::GetPortfolioUseCase;
pub use list_trades::ListTradesUseCase;
pub use query_error::QueryError;
pub use query_share_rates::QueryShareRatesUseCase;
pub use settle_trade::{DEFAULT_LOOKUP_TIMEOUT, SettleTradeUseCase, SettlementError};
