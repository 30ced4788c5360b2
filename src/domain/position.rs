//! Read-only view of a trader's positions on a venue.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MarketRef, PositionRef, VenueId};

/// A single holding in a market outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderPosition {
    pub market: MarketRef,
    pub position: PositionRef,
    /// Outcome shares held.
    pub size: Decimal,
    /// Average entry price, if the venue reports one.
    #[serde(default)]
    pub average_price: Option<Decimal>,
}

/// Snapshot of a wallet's positions; informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionSnapshot {
    pub venue: VenueId,
    pub address: String,
    pub positions: Vec<TraderPosition>,
}

impl PositionSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of position sizes across all markets.
    #[must_use]
    pub fn total_size(&self) -> Decimal {
        self.positions.iter().map(|p| p.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_size_sums_positions() {
        let snapshot = PositionSnapshot {
            venue: VenueId::new("polymarket"),
            address: "0x1".into(),
            positions: vec![
                TraderPosition {
                    market: MarketRef::new("a"),
                    position: PositionRef::new("YES"),
                    size: dec!(12.5),
                    average_price: Some(dec!(0.4)),
                },
                TraderPosition {
                    market: MarketRef::new("b"),
                    position: PositionRef::new("NO"),
                    size: dec!(2.5),
                    average_price: None,
                },
            ],
        };
        assert_eq!(snapshot.total_size(), dec!(15));
        assert!(!snapshot.is_empty());
    }
}
