//! Settlement Engine Binary
//!
//! Starts the trade settlement HTTP service backed by in-memory stores.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin settlement-engine -- config.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `SETTLEMENT_CONFIG`: Config file path (default: first CLI argument, then `config.yaml`)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`
//!
//! Any `${VAR}` referenced from the config file is read from the environment
//! or a `.env` file.

use std::net::SocketAddr;

use settlement_engine::config::{Config, load_config};
use settlement_engine::infrastructure::config::InMemoryContainer;
use settlement_engine::infrastructure::http::create_router;
use settlement_engine::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    let path = config_path();
    let (config, missing_file) = match load_config(path.as_deref()) {
        Ok(config) => (config, false),
        Err(e) if e.is_missing_file() => (Config::default(), true),
        Err(e) => return Err(e.into()),
    };

    init_tracing(&config.observability.logging)?;

    if missing_file {
        tracing::warn!(
            path = path.as_deref().unwrap_or(settlement_engine::config::DEFAULT_CONFIG_PATH),
            "Config file not found, using defaults"
        );
    }

    tracing::info!("Starting Settlement Engine");
    log_config(&config);

    let container = InMemoryContainer::in_memory(&config.seed)?
        .with_lookup_timeout(config.settlement.lookup_timeout());
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let http_addr: SocketAddr = config.server.listen_address().parse()?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /api/Trade");
    tracing::info!("  GET  /api/Trade/{{portfolio_id}}");
    tracing::info!("  GET  /api/Portfolio/{{portfolio_id}}");
    tracing::info!("  GET  /api/Share/{{symbol}}");
    tracing::info!("  GET  /api/Share/{{symbol}}/latest");

    let listener = TcpListener::bind(http_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Settlement engine stopped");
    Ok(())
}

/// Resolve the config path from `SETTLEMENT_CONFIG` or the first argument.
fn config_path() -> Option<String> {
    std::env::var("SETTLEMENT_CONFIG")
        .ok()
        .filter(|p| !p.is_empty())
        .or_else(|| std::env::args().nth(1))
}

fn log_config(config: &Config) {
    tracing::info!(
        bind_address = %config.server.bind_address,
        http_port = config.server.http_port,
        lookup_timeout_ms = config.settlement.lookup_timeout_ms,
        seeded_portfolios = config.seed.portfolios.len(),
        seeded_rates = config.seed.share_rates.len(),
        "Configuration loaded"
    );
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
