//! Delay schedule between keeper cycles.

use std::time::Duration;

use super::config::KeeperConfig;

/// Computes the wait before the next cycle from the consecutive failure count.
#[derive(Debug, Clone)]
pub struct CycleSchedule {
    interval: Duration,
    backoff: Option<(f64, Duration)>,
}

impl CycleSchedule {
    #[must_use]
    pub fn from_config(config: &KeeperConfig) -> Self {
        let backoff = config.backoff.enabled.then(|| {
            (
                config.backoff.multiplier.max(1.0),
                Duration::from_millis(config.backoff.max_interval_ms),
            )
        });
        Self {
            interval: config.interval(),
            backoff,
        }
    }

    /// Delay before the next cycle after `consecutive_failures` failed cycles in a row.
    #[must_use]
    pub fn next_delay(&self, consecutive_failures: u32) -> Duration {
        let Some((multiplier, max)) = self.backoff else {
            return self.interval;
        };
        if consecutive_failures == 0 {
            return self.interval;
        }

        // Clamp the exponent; the ceiling is reached long before this.
        let exponent = consecutive_failures.min(32) as i32;
        let scaled = self.interval.as_secs_f64() * multiplier.powi(exponent);
        if !scaled.is_finite() || scaled >= max.as_secs_f64() {
            return max.max(self.interval);
        }
        Duration::from_secs_f64(scaled)
    }
}
