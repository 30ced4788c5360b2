//! Verification keeper configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the verification keeper loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeeperConfig {
    /// Delay between the end of one cycle and the start of the next (milliseconds).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Upper bound on any single capability call within a cycle (milliseconds).
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
    /// Optional exponential backoff after consecutive failed cycles.
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl KeeperConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            call_timeout_ms: default_call_timeout_ms(),
            backoff: BackoffConfig::default(),
        }
    }
}

/// Backoff applied on top of the fixed interval. Disabled by default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackoffConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Multiplier applied per consecutive failed cycle.
    #[serde(default = "default_backoff_multiplier")]
    pub multiplier: f64,
    /// Ceiling for the backed-off delay (milliseconds).
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            multiplier: default_backoff_multiplier(),
            max_interval_ms: default_max_interval_ms(),
        }
    }
}

const fn default_interval_ms() -> u64 {
    2000
}

const fn default_call_timeout_ms() -> u64 {
    30_000
}

const fn default_backoff_multiplier() -> f64 {
    2.0
}

const fn default_max_interval_ms() -> u64 {
    60_000
}
