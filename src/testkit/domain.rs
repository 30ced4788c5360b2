//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{OrderRequest, PendingOrderId, Side};

/// The default startup order: BUY 10 USDC of YES.
pub fn order_request() -> OrderRequest {
    OrderRequest::new(
        "polymarket",
        "will-google-have-the-top-ai-model-on-may-31",
        "YES",
        Side::Buy,
        Decimal::TEN,
    )
    .expect("valid test order")
}

/// Pending ids named `o0`, `o1`, ..., `o{n-1}`.
pub fn pending_ids(n: usize) -> Vec<PendingOrderId> {
    (0..n).map(|i| PendingOrderId::new(format!("o{i}"))).collect()
}
