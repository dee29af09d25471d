// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::items_after_statements
    )
)]

//! Settlement Engine - Rust Core Library
//!
//! Records BUY/SELL share trades against portfolios, pricing each trade at
//! the latest recorded share rate.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects)
//!   - `shared`: identifiers, symbols, quantities, money, timestamps
//!   - `trade_settlement`: trades, portfolios, share rates, net positions,
//!     rejection reasons and the trade ledger interface
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for the rate and portfolio sources
//!   - `use_cases`: `SettleTrade`, `ListTrades`, `GetPortfolio`, `QueryShareRates`
//!   - `services`: per-position locks serializing SELL settlement
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: in-memory ledger, rate and portfolio stores
//!   - `http`: axum REST API
//!   - `config`: Dependency injection container
//!
//! Cross-cutting: `config` (YAML loading), `error` (HTTP error mapping),
//! `telemetry` (tracing subscriber setup).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

pub mod config;
pub mod error;
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::shared::{Money, PortfolioId, Quantity, Symbol, Timestamp, TradeId};
pub use domain::trade_settlement::{
    NetPosition, Portfolio, RejectionReason, ShareRate, Trade, TradeAction, TradeLedger,
};

// Application re-exports
pub use application::dto::{TradeDto, TradeRequest, TradeRequestDto};
pub use application::ports::{PortfolioSourcePort, RateHistoryPort, RateSourcePort};
pub use application::use_cases::{
    GetPortfolioUseCase, ListTradesUseCase, QueryShareRatesUseCase, SettleTradeUseCase,
    SettlementError,
};

// Infrastructure re-exports
pub use infrastructure::config::{Container, InMemoryContainer};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{
    InMemoryPortfolioRepository, InMemoryShareRateRepository, InMemoryTradeLedger,
};
