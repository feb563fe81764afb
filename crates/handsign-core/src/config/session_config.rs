use serde::{Deserialize, Serialize};

use super::decision_config::secs_to_duration;
use super::defaults;

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle time after which a session is evicted (seconds).
    pub ttl_secs: f64,
    /// Minimum time between inline sweeps (seconds). 0 sweeps on every decision.
    pub sweep_interval_secs: f64,
    /// Session id used when a request carries none.
    pub default_session_id: String,
}

impl SessionConfig {
    pub fn ttl(&self) -> chrono::Duration {
        secs_to_duration(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> chrono::Duration {
        secs_to_duration(self.sweep_interval_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_SESSION_TTL_SECS,
            sweep_interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
            default_session_id: defaults::DEFAULT_SESSION_ID.to_string(),
        }
    }
}
