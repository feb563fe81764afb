//! Session lifecycle: throttled idle eviction.
//!
//! A sweep walks every shard of the store, so it is rate limited by a
//! configurable interval. With an interval of zero every decision sweeps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

const NEVER: i64 = i64::MIN;

/// Decides when the next inline sweep is due.
#[derive(Debug)]
pub struct SweepSchedule {
    interval_ms: i64,
    last_sweep_ms: AtomicI64,
}

impl SweepSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: interval.num_milliseconds().max(0),
            last_sweep_ms: AtomicI64::new(NEVER),
        }
    }

    /// Claim the sweep due at `now`. Returns true for exactly one caller per
    /// interval; concurrent callers that lose the race skip the sweep.
    pub fn claim(&self, now: DateTime<Utc>) -> bool {
        if self.interval_ms == 0 {
            return true;
        }
        let now_ms = now.timestamp_millis();
        let last = self.last_sweep_ms.load(Ordering::Acquire);
        if last != NEVER && now_ms.saturating_sub(last) < self.interval_ms {
            return false;
        }
        self.last_sweep_ms
            .compare_exchange(last, now_ms, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn interval(&self) -> Duration {
        Duration::milliseconds(self.interval_ms)
    }
}
