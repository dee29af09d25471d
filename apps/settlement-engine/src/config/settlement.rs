//! Settlement behaviour configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settlement configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Upper bound on each rate/portfolio lookup, in milliseconds.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl SettlementConfig {
    /// Lookup bound as a `Duration`.
    #[must_use]
    pub const fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

const fn default_lookup_timeout_ms() -> u64 {
    5_000
}
