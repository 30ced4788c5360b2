//! One-shot order submission.
//!
//! Builds exactly one signed order and executes it exactly once. Failures
//! are not retried; they propagate so the caller can abort the run.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{OrderContext, OrderRequest, PositionSnapshot};
use crate::error::Result;
use crate::port::outbound::venue::OrderVenue;

/// Submits a single order through an [`OrderVenue`].
pub struct OrderSubmitter {
    venue: Arc<dyn OrderVenue>,
}

impl OrderSubmitter {
    pub fn new(venue: Arc<dyn OrderVenue>) -> Self {
        Self { venue }
    }

    /// Build then execute the order described by `request`.
    ///
    /// # Errors
    ///
    /// Returns the venue's build or execution error unchanged.
    pub async fn submit(&self, request: &OrderRequest) -> Result<OrderContext> {
        info!(
            venue = %request.venue(),
            market = %request.market(),
            position = %request.position(),
            side = %request.side(),
            funding = %request.funding(),
            "Building order"
        );

        let signed = self.venue.build_order(request).await?;
        info!(
            exchange = self.venue.venue_name(),
            signature = signed.signature(),
            order = %signed.payload(),
            "Executing order"
        );

        let context = self.venue.execute_order(signed).await?;
        info!(
            order_id = %context.order_id,
            tx_hash = context.tx_hash.as_deref().unwrap_or("-"),
            status = context.status.as_deref().unwrap_or("-"),
            "Open order"
        );

        Ok(context)
    }

    /// Fetch and log the trader's positions on the request's venue.
    ///
    /// Informational: a failure is logged and yields `None`.
    pub async fn report_positions(
        &self,
        request: &OrderRequest,
        address: &str,
    ) -> Option<PositionSnapshot> {
        info!(venue = %request.venue(), address, "Getting positions");
        match self.venue.trader_positions(request.venue(), address).await {
            Ok(snapshot) => {
                info!(
                    venue = %snapshot.venue,
                    positions = snapshot.positions.len(),
                    total_size = %snapshot.total_size(),
                    snapshot = ?snapshot.positions,
                    "Trader positions"
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch trader positions");
                None
            }
        }
    }
}
