//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::dto::{TradeDto, TradeRequestDto};
use crate::application::ports::{PortfolioSourcePort, RateHistoryPort, RateSourcePort};
use crate::application::use_cases::{
    GetPortfolioUseCase, ListTradesUseCase, QueryShareRatesUseCase, SettleTradeUseCase,
};
use crate::domain::shared::{PortfolioId, Symbol};
use crate::domain::trade_settlement::TradeLedger;
use crate::error::ServiceError;

use super::request::JsonBody;
use super::response::HealthResponse;

/// Application state shared across handlers.
pub struct AppState<R, P, L>
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    /// Use case for settling trades.
    pub settle_trade: Arc<SettleTradeUseCase<R, P, L>>,
    /// Use case for listing a portfolio's trades.
    pub list_trades: Arc<ListTradesUseCase<L>>,
    /// Use case for reading a portfolio.
    pub get_portfolio: Arc<GetPortfolioUseCase<P, L>>,
    /// Use case for browsing share rates.
    pub share_rates: Arc<QueryShareRatesUseCase<R>>,
    /// Application version.
    pub version: String,
}

impl<R, P, L> Clone for AppState<R, P, L>
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    fn clone(&self) -> Self {
        Self {
            settle_trade: Arc::clone(&self.settle_trade),
            list_trades: Arc::clone(&self.list_trades),
            get_portfolio: Arc::clone(&self.get_portfolio),
            share_rates: Arc::clone(&self.share_rates),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<R, P, L>(state: AppState<R, P, L>) -> Router
where
    R: RateSourcePort + RateHistoryPort + 'static,
    P: PortfolioSourcePort + 'static,
    L: TradeLedger + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/Trade", post(settle_trade))
        .route("/api/Trade/{portfolio_id}", get(list_trades))
        .route("/api/Portfolio/{portfolio_id}", get(get_portfolio))
        .route("/api/Share/{symbol}", get(share_history))
        .route("/api/Share/{symbol}/latest", get(latest_share_rate))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<R, P, L>(State(state): State<AppState<R, P, L>>) -> impl IntoResponse
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Settle a trade. Responds 201 with the stored trade.
async fn settle_trade<R, P, L>(
    State(state): State<AppState<R, P, L>>,
    JsonBody(request): JsonBody<TradeRequestDto>,
) -> Result<impl IntoResponse, ServiceError>
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    let request = request.validate().map_err(|errors| {
        tracing::debug!(%errors, "Trade request failed validation");
        ServiceError::from(errors)
    })?;

    let trade = state.settle_trade.execute(request).await?;

    Ok((StatusCode::CREATED, Json(TradeDto::from_trade(&trade))))
}

/// List every trade of a portfolio.
async fn list_trades<R, P, L>(
    State(state): State<AppState<R, P, L>>,
    Path(portfolio_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError>
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    let trades = state
        .list_trades
        .execute(PortfolioId::new(portfolio_id))
        .await?;
    Ok(Json(trades))
}

/// Read a portfolio with its trades.
async fn get_portfolio<R, P, L>(
    State(state): State<AppState<R, P, L>>,
    Path(portfolio_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError>
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    state
        .get_portfolio
        .execute(PortfolioId::new(portfolio_id))
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Portfolio", portfolio_id))
}

/// Rate history of a symbol, newest first.
async fn share_history<R, P, L>(
    State(state): State<AppState<R, P, L>>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    let symbol = parse_symbol(&symbol)?;
    let history = state.share_rates.history(&symbol).await?;
    Ok(Json(history))
}

/// Latest rate of a symbol.
async fn latest_share_rate<R, P, L>(
    State(state): State<AppState<R, P, L>>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    R: RateSourcePort + RateHistoryPort,
    P: PortfolioSourcePort,
    L: TradeLedger,
{
    let symbol = parse_symbol(&symbol)?;
    state
        .share_rates
        .latest(&symbol)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Symbol", &symbol))
}

fn parse_symbol(raw: &str) -> Result<Symbol, ServiceError> {
    let symbol = Symbol::new(raw);
    symbol
        .validate()
        .map_err(|e| ServiceError::invalid_request(e.to_string()).with_context("symbol", raw))?;
    Ok(symbol)
}
