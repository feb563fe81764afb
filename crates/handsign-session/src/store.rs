//! SessionStore: concurrent per-session access via DashMap.
//!
//! Holding the `RefMut` returned by [`SessionStore::get_or_create`] locks the
//! session's shard. Never sweep or look up another session while holding it.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;

use handsign_core::config::{defaults, SessionConfig};

use crate::cleanup::SweepSchedule;
use crate::state::SessionState;

/// Thread-safe session store. Inject one into each engine; stores are
/// independent of each other.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, SessionState>,
    config: SessionConfig,
    window_size: usize,
    schedule: SweepSchedule,
}

impl SessionStore {
    /// Store with default TTL and window size.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default(), defaults::DEFAULT_WINDOW_SIZE)
    }

    /// Store whose fresh sessions get windows of `window_size`.
    pub fn with_config(config: SessionConfig, window_size: usize) -> Self {
        let schedule = SweepSchedule::new(config.sweep_interval());
        Self {
            sessions: DashMap::new(),
            config,
            window_size,
            schedule,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl()
    }

    /// Exclusive access to a session, creating it if unseen. Updates
    /// `last_seen_at`. A session that outlived its TTL without being swept
    /// is replaced by a fresh one.
    pub fn get_or_create(&self, session_id: &str, now: DateTime<Utc>) -> RefMut<'_, String, SessionState> {
        self.get_or_create_with(session_id, self.window_size, now)
    }

    /// [`get_or_create`](Self::get_or_create) with the window size for a
    /// fresh or replaced session chosen by the caller. Live sessions keep
    /// the window they were created with.
    pub fn get_or_create_with(
        &self,
        session_id: &str,
        window_size: usize,
        now: DateTime<Utc>,
    ) -> RefMut<'_, String, SessionState> {
        let ttl = self.ttl();

        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            if entry.is_expired(now, ttl) {
                tracing::debug!(session_id = %session_id, "expired session replaced");
                *entry = SessionState::new(session_id, window_size, now);
            }
            entry.touch(now);
            return entry;
        }

        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id = %session_id, "session created");
                SessionState::new(session_id, window_size, now)
            });
        entry.touch(now);
        entry
    }

    /// Cloned snapshot of a session.
    pub fn snapshot(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.get(session_id).map(|r| r.clone())
    }

    /// Read a session without touching it.
    pub fn peek<R>(&self, session_id: &str, f: impl FnOnce(&SessionState) -> R) -> Option<R> {
        self.sessions.get(session_id).map(|r| f(&r))
    }

    /// Replace a session wholesale.
    pub fn insert(&self, state: SessionState) {
        self.sessions.insert(state.session_id.clone(), state);
    }

    pub fn remove(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.remove(session_id).map(|(_, v)| v)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Remove every session idle longer than `ttl`. Returns how many were removed.
    ///
    /// Blocks on shards with a decision in flight, so a session is never
    /// evicted mid-decision.
    pub fn sweep(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut evicted = 0usize;
        self.sessions.retain(|id, state| {
            let keep = !state.is_expired(now, ttl);
            if !keep {
                evicted += 1;
                tracing::debug!(session_id = %id, idle_ms = state.idle_duration(now).num_milliseconds(), "session evicted");
            }
            keep
        });
        if evicted > 0 {
            tracing::info!(evicted, remaining = self.sessions.len(), "idle sessions swept");
        }
        evicted
    }

    /// Sweep with the configured TTL if the sweep interval has elapsed.
    pub fn maybe_sweep(&self, now: DateTime<Utc>) -> usize {
        if !self.schedule.claim(now) {
            return 0;
        }
        self.sweep(now, self.ttl())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
