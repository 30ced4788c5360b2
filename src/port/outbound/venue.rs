//! Venue and oracle capability ports.
//!
//! The keeper never implements these operations itself; it consumes them.
//! Every method is a suspension point that typically performs a network
//! round trip.

use async_trait::async_trait;

use crate::domain::{
    OrderContext, OrderRequest, PendingOrderId, PositionSnapshot, SignedOrder, VenueId,
};
use crate::error::Result;

/// Order-side capabilities of a venue.
#[async_trait]
pub trait OrderVenue: Send + Sync {
    /// Build and sign an order for the request.
    ///
    /// Fails with [`SubmissionError::BuildFailed`](crate::error::SubmissionError::BuildFailed)
    /// on a malformed request or venue rejection.
    async fn build_order(&self, request: &OrderRequest) -> Result<SignedOrder>;

    /// Broadcast a signed order. Takes ownership so an order executes at most once.
    ///
    /// Fails with [`SubmissionError::ExecutionFailed`](crate::error::SubmissionError::ExecutionFailed).
    async fn execute_order(&self, order: SignedOrder) -> Result<OrderContext>;

    /// Current positions of `address` on `venue`.
    async fn trader_positions(&self, venue: &VenueId, address: &str) -> Result<PositionSnapshot>;

    /// Venue name for logging.
    fn venue_name(&self) -> &'static str;
}

/// Oracle price verification capabilities.
///
/// `scan_pending_price_data` and `pending_order_ids` describe the same
/// venue-side state but are not atomic with each other.
#[async_trait]
pub trait PriceVerifier: Send + Sync {
    /// Whether any order currently has oracle price data awaiting verification.
    async fn scan_pending_price_data(&self) -> Result<bool>;

    /// Identifiers of orders currently awaiting verification.
    async fn pending_order_ids(&self) -> Result<Vec<PendingOrderId>>;

    /// Trigger venue-wide verification of whatever is pending.
    ///
    /// Must be idempotent from the caller's point of view: the venue decides
    /// which orders still need verifying.
    async fn verify_price(&self) -> Result<()>;
}
