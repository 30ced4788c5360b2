//! Venue-agnostic domain types.

mod id;
mod order;
mod position;

pub use id::{MarketRef, PendingOrderId, PositionRef, VenueId};
pub use order::{OrderContext, OrderRequest, Side, SignedOrder};
pub use position::{PositionSnapshot, TraderPosition};
