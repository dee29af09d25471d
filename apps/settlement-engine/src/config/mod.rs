//! Configuration module for the settlement engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the server, logging, settlement and seed data.
//!
//! # Usage
//!
//! ```rust,ignore
//! use settlement_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod observability;
mod seed;
mod server;
mod settlement;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use seed::{SeedConfig, SeedPortfolio, SeedShareRate};
pub use server::ServerConfig;
pub use settlement::SettlementConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Whether the error means the config file does not exist.
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            Self::ReadError { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Settlement configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Startup data for the in-memory stores.
    #[serde(default)]
    pub seed: SeedConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    if config.settlement.lookup_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "settlement.lookup_timeout_ms must be positive".to_string(),
        ));
    }

    let format = config.observability.logging.format.to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    let mut seen = HashSet::new();
    for (index, portfolio) in config.seed.portfolios.iter().enumerate() {
        if !seen.insert(portfolio.id) {
            return Err(ConfigError::ValidationError(format!(
                "seed.portfolios[{index}]: duplicate portfolio id {}",
                portfolio.id
            )));
        }
        portfolio.to_portfolio().map_err(|e| {
            ConfigError::ValidationError(format!("seed.portfolios[{index}]: {e}"))
        })?;
    }

    for (index, rate) in config.seed.share_rates.iter().enumerate() {
        rate.to_share_rate().map_err(|e| {
            ConfigError::ValidationError(format!("seed.share_rates[{index}]: {e}"))
        })?;
    }

    Ok(())
}
