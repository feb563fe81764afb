//! # handsign-session
//!
//! Per-session decision state with idle eviction.
//! Concurrent access via `DashMap`: requests for one session are serialized
//! on its entry, different sessions proceed independently.
//!
//! ## Modules
//!
//! - `store`: `SessionStore`, get-or-create and sweep
//! - `state`: `SessionState` owned by the store
//! - `window`: `VotingWindow`, bounded history with weighted vote aggregation
//! - `cooldown`: `CooldownGate`, suppression after a final
//! - `cleanup`: throttled sweep scheduling

pub mod cleanup;
pub mod cooldown;
pub mod state;
pub mod store;
pub mod window;

pub use cleanup::SweepSchedule;
pub use cooldown::CooldownGate;
pub use state::SessionState;
pub use store::SessionStore;
pub use window::{VoteOutcome, VotingWindow};
