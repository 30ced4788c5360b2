//! In-memory venue with scripted results and a call log.
//!
//! Each scan pops the next [`ScanStep`] (defaults to "not ready" when the
//! script runs out). Verify results are popped the same way and default to
//! success. Call times use `tokio::time::Instant`, so they follow paused
//! test time.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::json;
use tokio::time::Instant;

use crate::domain::{
    OrderContext, OrderRequest, PendingOrderId, PositionSnapshot, SignedOrder, VenueId,
};
use crate::error::{Error, Result, SubmissionError, VerificationError};
use crate::port::outbound::venue::{OrderVenue, PriceVerifier};

/// Capability invoked on the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    BuildOrder,
    ExecuteOrder,
    TraderPositions,
    ScanPendingPriceData,
    PendingOrderIds,
    VerifyPrice,
}

/// Scripted response for one scan.
#[derive(Debug, Clone)]
pub enum ScanStep {
    Ready(bool),
    Fail(String),
    /// Respond with the flag after sleeping for the duration.
    Delay(Duration, bool),
}

#[derive(Default)]
struct Script {
    build_error: Option<String>,
    execute_error: Option<String>,
    positions_error: Option<String>,
    scans: VecDeque<ScanStep>,
    pending: Vec<PendingOrderId>,
    pending_error: Option<String>,
    verifies: VecDeque<std::result::Result<(), String>>,
    verify_delay: Option<Duration>,
}

/// Scripted [`OrderVenue`] + [`PriceVerifier`].
#[derive(Default)]
pub struct ScriptedVenue {
    script: Mutex<Script>,
    calls: Mutex<Vec<(Call, Instant)>>,
}

impl ScriptedVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scans(self, scans: Vec<ScanStep>) -> Self {
        self.script.lock().scans = scans.into();
        self
    }

    pub fn with_pending_ids(self, ids: Vec<PendingOrderId>) -> Self {
        self.script.lock().pending = ids;
        self
    }

    pub fn failing_pending_ids(self, reason: &str) -> Self {
        self.script.lock().pending_error = Some(reason.to_string());
        self
    }

    pub fn with_verify_results(self, results: Vec<std::result::Result<(), String>>) -> Self {
        self.script.lock().verifies = results.into();
        self
    }

    pub fn with_verify_delay(self, delay: Duration) -> Self {
        self.script.lock().verify_delay = Some(delay);
        self
    }

    pub fn failing_build(self, reason: &str) -> Self {
        self.script.lock().build_error = Some(reason.to_string());
        self
    }

    pub fn failing_execute(self, reason: &str) -> Self {
        self.script.lock().execute_error = Some(reason.to_string());
        self
    }

    pub fn failing_positions(self, reason: &str) -> Self {
        self.script.lock().positions_error = Some(reason.to_string());
        self
    }

    /// All calls in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().iter().map(|(call, _)| *call).collect()
    }

    /// Number of times `call` was invoked.
    pub fn count(&self, call: Call) -> usize {
        self.calls.lock().iter().filter(|(c, _)| *c == call).count()
    }

    /// Times at which `call` was invoked.
    pub fn call_times(&self, call: Call) -> Vec<Instant> {
        self.calls
            .lock()
            .iter()
            .filter(|(c, _)| *c == call)
            .map(|(_, at)| *at)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push((call, Instant::now()));
    }
}

#[async_trait]
impl OrderVenue for ScriptedVenue {
    async fn build_order(&self, request: &OrderRequest) -> Result<SignedOrder> {
        self.record(Call::BuildOrder);
        if let Some(reason) = self.script.lock().build_error.clone() {
            return Err(SubmissionError::BuildFailed(reason).into());
        }
        let payload = json!({
            "provider": request.venue().as_str(),
            "market": request.market().as_str(),
            "position": request.position().as_str(),
            "side": request.side().to_string(),
            "funding": request.funding().to_string(),
        });
        Ok(SignedOrder::new(payload, "0xsigned"))
    }

    async fn execute_order(&self, order: SignedOrder) -> Result<OrderContext> {
        self.record(Call::ExecuteOrder);
        if let Some(reason) = self.script.lock().execute_error.clone() {
            return Err(SubmissionError::ExecutionFailed(reason).into());
        }
        Ok(OrderContext {
            order_id: format!("order-{}", order.signature()),
            tx_hash: Some("0xtx".into()),
            status: Some("matched".into()),
            submitted_at: Utc::now(),
        })
    }

    async fn trader_positions(&self, venue: &VenueId, address: &str) -> Result<PositionSnapshot> {
        self.record(Call::TraderPositions);
        if let Some(reason) = self.script.lock().positions_error.clone() {
            return Err(Error::Positions(reason));
        }
        Ok(PositionSnapshot {
            venue: venue.clone(),
            address: address.to_string(),
            positions: Vec::new(),
        })
    }

    fn venue_name(&self) -> &'static str {
        "scripted"
    }
}

#[async_trait]
impl PriceVerifier for ScriptedVenue {
    async fn scan_pending_price_data(&self) -> Result<bool> {
        self.record(Call::ScanPendingPriceData);
        let step = self
            .script
            .lock()
            .scans
            .pop_front()
            .unwrap_or(ScanStep::Ready(false));
        match step {
            ScanStep::Ready(ready) => Ok(ready),
            ScanStep::Fail(reason) => Err(VerificationError::ScanFailed(reason).into()),
            ScanStep::Delay(delay, ready) => {
                tokio::time::sleep(delay).await;
                Ok(ready)
            }
        }
    }

    async fn pending_order_ids(&self) -> Result<Vec<PendingOrderId>> {
        self.record(Call::PendingOrderIds);
        let script = self.script.lock();
        match &script.pending_error {
            Some(reason) => Err(VerificationError::PendingIdsFailed(reason.clone()).into()),
            None => Ok(script.pending.clone()),
        }
    }

    async fn verify_price(&self) -> Result<()> {
        self.record(Call::VerifyPrice);
        let (result, delay) = {
            let mut script = self.script.lock();
            (script.verifies.pop_front().unwrap_or(Ok(())), script.verify_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result.map_err(|reason| VerificationError::VerifyFailed(reason).into())
    }
}
