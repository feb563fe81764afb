//! Post-final suppression window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Suppresses finals until a deadline. Decays passively: nothing has to
/// run for the gate to reopen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownGate {
    until: Option<DateTime<Utc>>,
}

impl CooldownGate {
    /// Close the gate for `duration` starting at `now`.
    pub fn arm(&mut self, now: DateTime<Utc>, duration: Duration) {
        self.until = Some(now + duration);
    }

    pub fn clear(&mut self) {
        self.until = None;
    }

    /// Whether finals are suppressed at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Time left before the gate reopens (zero when open).
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.until {
            Some(until) if now < until => until - now,
            _ => Duration::zero(),
        }
    }

    pub fn until(&self) -> Option<DateTime<Utc>> {
        self.until
    }
}
