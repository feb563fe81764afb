use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which decision policy the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Sliding-window weighted voting with cooldown.
    #[default]
    Window,
    /// Consecutive identical top-1 labels.
    Streak,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Window => f.write_str("window"),
            PolicyKind::Streak => f.write_str("streak"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "window" => Ok(PolicyKind::Window),
            "streak" => Ok(PolicyKind::Streak),
            other => Err(format!("unknown policy '{other}'")),
        }
    }
}

/// Decision engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Active decision policy.
    pub policy: PolicyKind,
    /// Voting window capacity (W).
    pub window_size: usize,
    /// Minimum top-1 probability for a request to count as evidence.
    pub base_threshold: f64,
    /// Minimum winner share of the weighted vote.
    pub vote_min_ratio: f64,
    /// Minimum mean probability of the winner across the window.
    pub min_avg_prob: f64,
    /// Suppression period after a final (seconds).
    pub cooldown_secs: f64,
    /// Consecutive qualifying requests needed by the streak policy.
    pub streak_n: u32,
    /// Candidates kept per request (K).
    pub top_k: usize,
    /// Vote weight per rank; ranks past the end weigh 1.0.
    pub rank_weights: Vec<f64>,
}

impl DecisionConfig {
    /// Cooldown as a chrono duration, millisecond precision.
    pub fn cooldown(&self) -> chrono::Duration {
        secs_to_duration(self.cooldown_secs)
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            window_size: defaults::DEFAULT_WINDOW_SIZE,
            base_threshold: defaults::DEFAULT_BASE_THRESHOLD,
            vote_min_ratio: defaults::DEFAULT_VOTE_MIN_RATIO,
            min_avg_prob: defaults::DEFAULT_MIN_AVG_PROB,
            cooldown_secs: defaults::DEFAULT_COOLDOWN_SECS,
            streak_n: defaults::DEFAULT_STREAK_N,
            top_k: defaults::DEFAULT_TOP_K,
            rank_weights: defaults::DEFAULT_RANK_WEIGHTS.to_vec(),
        }
    }
}

/// Convert fractional seconds to a chrono duration, millisecond precision.
pub(crate) fn secs_to_duration(secs: f64) -> chrono::Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return chrono::Duration::zero();
    }
    chrono::Duration::milliseconds((secs * 1000.0).round() as i64)
}
