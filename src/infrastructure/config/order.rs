//! The one-shot order submitted at startup.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{OrderRequest, Side};
use crate::error::{ConfigError, SubmissionError};

/// Order parameters as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderConfig {
    /// Venue the order is routed to.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Market id or slug.
    #[serde(default = "default_market")]
    pub market: String,
    /// Position id or outcome name.
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default = "default_side")]
    pub side: Side,
    /// Absolute USDC flow for the order.
    #[serde(default = "default_funding_usdc")]
    pub funding_usdc: Decimal,
}

impl OrderConfig {
    /// Validate into an [`OrderRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn to_request(&self) -> Result<OrderRequest, ConfigError> {
        OrderRequest::new(
            self.provider.as_str(),
            self.market.as_str(),
            self.position.as_str(),
            self.side,
            self.funding_usdc,
        )
        .map_err(|e| match e {
            SubmissionError::InvalidOrder { field, reason } => {
                ConfigError::InvalidValue { field, reason }
            }
            other => ConfigError::InvalidValue {
                field: "order",
                reason: other.to_string(),
            },
        })
    }
}

fn default_provider() -> String {
    "polymarket".into()
}

fn default_market() -> String {
    "will-google-have-the-top-ai-model-on-may-31".into()
}

fn default_position() -> String {
    "YES".into()
}

const fn default_side() -> Side {
    Side::Buy
}

const fn default_funding_usdc() -> Decimal {
    Decimal::TEN
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            market: default_market(),
            position: default_position(),
            side: default_side(),
            funding_usdc: default_funding_usdc(),
        }
    }
}
