//! SessionState: rolling decision state for one signer/stream.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::cooldown::CooldownGate;
use crate::window::VotingWindow;

/// Per-session state. Owned by the `SessionStore`; mutated only on behalf
/// of the session it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Opaque session identifier.
    pub session_id: String,
    /// When this session was created.
    pub created_at: DateTime<Utc>,
    /// Most recent request for this session; drives idle eviction.
    pub last_seen_at: DateTime<Utc>,
    /// Recent admitted candidate sets (window policy).
    pub window: VotingWindow,
    /// Post-final suppression (window policy).
    pub cooldown: CooldownGate,
    /// Consecutive qualifying requests for `last_label` (streak policy).
    pub streak: u32,
    /// Label the streak is counting.
    pub last_label: Option<String>,
    /// Requests decided for this session.
    pub requests: u64,
    /// Finals emitted for this session.
    pub finals: u64,
}

impl SessionState {
    /// Fresh state: empty window, no cooldown, streak 0.
    pub fn new(session_id: impl Into<String>, window_size: usize, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: now,
            last_seen_at: now,
            window: VotingWindow::new(window_size),
            cooldown: CooldownGate::default(),
            streak: 0,
            last_label: None,
            requests: 0,
            finals: 0,
        }
    }

    /// Record activity at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen_at = now;
    }

    /// Drop all decision evidence, keeping identity and activity timestamps.
    pub fn reset(&mut self) {
        self.window = VotingWindow::new(self.window.capacity());
        self.cooldown.clear();
        self.streak = 0;
        self.last_label = None;
    }

    /// Time since the last request.
    pub fn idle_duration(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_seen_at
    }

    /// Whether the session has been idle longer than `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.idle_duration(now) > ttl
    }
}
