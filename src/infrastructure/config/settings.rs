//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all keeper settings.
//! Non-secret settings come from a TOML file; the RPC endpoint and wallet
//! key come only from `POLYGON_RPC_URL` and `PRIVATE_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use polykeeper::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("keeper.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::order::OrderConfig;
use super::venue::VenueConfig;
use super::wallet::WalletConfig;
use crate::application::keeper::config::KeeperConfig;
use crate::domain::OrderRequest;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Venue API connection settings.
    #[serde(default)]
    pub venue: VenueConfig,

    /// The order submitted once at startup.
    #[serde(default)]
    pub order: OrderConfig,

    /// Verification keeper loop settings.
    #[serde(default)]
    pub keeper: KeeperConfig,

    /// Wallet settings, populated from the environment.
    #[serde(skip)]
    pub wallet: WalletConfig,
}

impl Config {
    /// Parse configuration from TOML content, reading secrets from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a required environment
    /// variable is missing, or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::parse_toml`].
    pub fn parse_toml_with_env<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.wallet = WalletConfig::from_lookup(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsing fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if it exists, otherwise use defaults plus the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is invalid, or if validation fails.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.wallet.endpoint()?;
        self.wallet.signer()?;

        url::Url::parse(&self.venue.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_url",
            reason: e.to_string(),
        })?;
        if self.venue.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        self.order.to_request()?;

        if self.keeper.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.keeper.call_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "call_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let backoff = &self.keeper.backoff;
        if backoff.enabled {
            if !(backoff.multiplier >= 1.0) {
                return Err(ConfigError::InvalidValue {
                    field: "multiplier",
                    reason: "must be >= 1.0".to_string(),
                }
                .into());
            }
            if backoff.max_interval_ms < self.keeper.interval_ms {
                return Err(ConfigError::InvalidValue {
                    field: "max_interval_ms",
                    reason: "must be >= interval_ms".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// The validated startup order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order section is invalid.
    pub fn order_request(&self) -> Result<OrderRequest> {
        Ok(self.order.to_request()?)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
