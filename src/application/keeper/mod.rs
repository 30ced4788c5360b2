//! Oracle price verification keeper.
//!
//! Each cycle scans the venue for pending price data, lists the pending
//! order ids, and triggers a venue-wide verification when the scan reports
//! work. The keeper holds no pending set of its own between cycles; it
//! rediscovers work from the venue every time, so a restart loses nothing.
//!
//! Cycles are strictly serialized and failure-isolated: an error in one
//! cycle is logged and the next tick is the only retry.

pub mod backoff;
pub mod config;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use self::backoff::CycleSchedule;
use self::config::KeeperConfig;
use crate::domain::PendingOrderId;
use crate::error::{Error, Result, VerificationError};
use crate::port::outbound::venue::PriceVerifier;

/// What happened during one keeper cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The scan reported no pending price data; verification was skipped.
    NoPendingData { pending: Vec<PendingOrderId> },
    /// Verification was triggered exactly once.
    Verified { pending: Vec<PendingOrderId> },
    /// A scan, id-listing or verify call failed or timed out.
    Failed(Error),
}

impl CycleOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub const fn verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// Counters accumulated over the lifetime of a keeper run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeeperStats {
    pub cycles: u64,
    pub idle_cycles: u64,
    pub verifications: u64,
    pub failures: u64,
    pub consecutive_failures: u32,
}

impl KeeperStats {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::NoPendingData { .. } => {
                self.idle_cycles += 1;
                self.consecutive_failures = 0;
            }
            CycleOutcome::Verified { .. } => {
                self.verifications += 1;
                self.consecutive_failures = 0;
            }
            CycleOutcome::Failed(_) => {
                self.failures += 1;
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
    }
}

/// Long-lived loop driving pending orders to verified.
pub struct VerificationKeeper {
    verifier: Arc<dyn PriceVerifier>,
    config: KeeperConfig,
    schedule: CycleSchedule,
}

impl VerificationKeeper {
    pub fn new(verifier: Arc<dyn PriceVerifier>, config: KeeperConfig) -> Self {
        let schedule = CycleSchedule::from_config(&config);
        Self {
            verifier,
            config,
            schedule,
        }
    }

    /// Run one scan-then-maybe-verify cycle.
    ///
    /// Never returns an error: failures are logged and reported as
    /// [`CycleOutcome::Failed`].
    pub async fn run_cycle(&self) -> CycleOutcome {
        let ready = match self
            .call("scan_pending_price_data", self.verifier.scan_pending_price_data())
            .await
        {
            Ok(ready) => ready,
            Err(e) => {
                error!(error = %e, "Error in verification cycle");
                return CycleOutcome::Failed(e);
            }
        };

        let pending = match self
            .call("pending_order_ids", self.verifier.pending_order_ids())
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "Error in verification cycle");
                return CycleOutcome::Failed(e);
            }
        };

        info!(ready, pending = ?pending, "Scanned pending price data");

        if !ready {
            info!("No pending price data");
            return CycleOutcome::NoPendingData { pending };
        }

        match self.call("verify_price", self.verifier.verify_price()).await {
            Ok(()) => {
                info!(pending = pending.len(), "Price verification submitted");
                CycleOutcome::Verified { pending }
            }
            Err(e) => {
                error!(error = %e, "Error in verification cycle");
                CycleOutcome::Failed(e)
            }
        }
    }

    /// Run cycles until `shutdown` turns true or its sender is dropped.
    ///
    /// The first cycle starts one interval after the call; each following
    /// cycle starts one interval after the previous one finished. A shutdown
    /// signal stops future ticks but never interrupts an in-flight cycle.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> KeeperStats {
        info!(
            interval_ms = self.config.interval_ms,
            call_timeout_ms = self.config.call_timeout_ms,
            backoff = self.config.backoff.enabled,
            "Starting verification keeper"
        );

        let mut stats = KeeperStats::default();

        while !*shutdown.borrow() {
            let delay = self.schedule.next_delay(stats.consecutive_failures);
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                result = shutdown.changed() => {
                    if result.is_err() {
                        info!("Shutdown channel closed");
                        break;
                    }
                    continue;
                }
            }

            debug!(cycle = stats.cycles + 1, "Keeper tick");
            let outcome = self.run_cycle().await;
            stats.record(&outcome);
        }

        info!(
            cycles = stats.cycles,
            verifications = stats.verifications,
            failures = stats.failures,
            "Verification keeper stopped"
        );
        stats
    }

    /// Spawn [`run`](Self::run) onto the runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<KeeperStats> {
        tokio::spawn(self.run(shutdown))
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.config.call_timeout(), fut).await {
            Ok(result) => result,
            Err(_) => Err(VerificationError::Timeout {
                operation,
                timeout_ms: self.config.call_timeout_ms,
            }
            .into()),
        }
    }
}
