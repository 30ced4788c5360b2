//! Order submission types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MarketRef, PositionRef, VenueId};
use crate::error::SubmissionError;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    #[serde(alias = "buy")]
    Buy,
    /// Sell order.
    #[serde(alias = "sell")]
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(SubmissionError::InvalidOrder {
                field: "side",
                reason: format!("expected BUY or SELL, got '{other}'"),
            }),
        }
    }
}

/// A validated request to build one order on a venue.
///
/// Fields are private so every instance has passed [`OrderRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    venue: VenueId,
    market: MarketRef,
    position: PositionRef,
    side: Side,
    funding: Decimal,
}

impl OrderRequest {
    /// Create a request, rejecting blank identifiers and non-positive funding.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::InvalidOrder`] naming the offending field.
    pub fn new(
        venue: impl Into<VenueId>,
        market: impl Into<MarketRef>,
        position: impl Into<PositionRef>,
        side: Side,
        funding: Decimal,
    ) -> Result<Self, SubmissionError> {
        let venue = venue.into();
        let market = market.into();
        let position = position.into();

        if venue.is_blank() {
            return Err(blank("venue"));
        }
        if market.is_blank() {
            return Err(blank("market"));
        }
        if position.is_blank() {
            return Err(blank("position"));
        }
        if funding <= Decimal::ZERO {
            return Err(SubmissionError::InvalidOrder {
                field: "funding",
                reason: format!("must be greater than 0, got {funding}"),
            });
        }

        Ok(Self {
            venue,
            market,
            position,
            side,
            funding,
        })
    }

    #[must_use]
    pub fn venue(&self) -> &VenueId {
        &self.venue
    }

    #[must_use]
    pub fn market(&self) -> &MarketRef {
        &self.market
    }

    #[must_use]
    pub fn position(&self) -> &PositionRef {
        &self.position
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Funding amount in quote currency (USDC).
    #[must_use]
    pub const fn funding(&self) -> Decimal {
        self.funding
    }
}

fn blank(field: &'static str) -> SubmissionError {
    SubmissionError::InvalidOrder {
        field,
        reason: "must not be empty".to_string(),
    }
}

/// A venue-built, wallet-signed order.
///
/// Opaque to the submitter. It is intentionally not `Clone`: executing an
/// order consumes it, so the same signed order cannot be sent twice.
#[derive(Debug)]
pub struct SignedOrder {
    payload: serde_json::Value,
    signature: String,
}

impl SignedOrder {
    #[must_use]
    pub fn new(payload: serde_json::Value, signature: impl Into<String>) -> Self {
        Self {
            payload,
            signature: signature.into(),
        }
    }

    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Split into payload and signature for transmission.
    #[must_use]
    pub fn into_parts(self) -> (serde_json::Value, String) {
        (self.payload, self.signature)
    }
}

/// Venue-side handle describing the effect of an executed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderContext {
    pub order_id: String,
    pub tx_hash: Option<String>,
    pub status: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl fmt::Display for OrderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order {}", self.order_id)?;
        if let Some(status) = &self.status {
            write!(f, " ({status})")?;
        }
        if let Some(tx_hash) = &self.tx_hash {
            write!(f, " tx {tx_hash}")?;
        }
        Ok(())
    }
}
