//! Trade Settlement Aggregates

mod portfolio;
mod trade;

pub use portfolio::Portfolio;
pub use trade::{NewTrade, Trade};
