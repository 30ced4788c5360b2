//! Canonical test configurations.

use crate::application::keeper::config::{BackoffConfig, KeeperConfig};

/// A well-known throwaway secp256k1 key. Never fund it.
pub const TEST_PRIVATE_KEY: &str =
    "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// Keeper config with the given period and per-call timeout, backoff off.
pub fn keeper(interval_ms: u64, call_timeout_ms: u64) -> KeeperConfig {
    KeeperConfig {
        interval_ms,
        call_timeout_ms,
        backoff: BackoffConfig::default(),
    }
}

/// Keeper config with exponential backoff enabled.
pub fn keeper_with_backoff(interval_ms: u64, multiplier: f64, max_interval_ms: u64) -> KeeperConfig {
    KeeperConfig {
        interval_ms,
        call_timeout_ms: 30_000,
        backoff: BackoffConfig {
            enabled: true,
            multiplier,
            max_interval_ms,
        },
    }
}
