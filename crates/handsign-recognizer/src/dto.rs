//! Request/response shapes of the recognition endpoint.

use handsign_core::config::PolicyKind;
use handsign_core::models::Frame;
use handsign_core::Verdict;
use handsign_observability::DecisionMetrics;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One recognition request: the latest landmark frames of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizeRequest {
    /// Absent or empty means the configured default session.
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub frames: Vec<Frame>,
    /// Emit the current top-1 as final regardless of evidence.
    #[serde(default, alias = "forceFinal")]
    pub force_final: bool,
}

impl RecognizeRequest {
    pub fn new(session_id: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            frames,
            force_final: false,
        }
    }

    pub fn forced(mut self) -> Self {
        self.force_final = true;
        self
    }
}

/// Verdict plus the number of frames the request carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecognizeResponse {
    #[serde(flatten)]
    pub verdict: Verdict,
    pub frames_received: usize,
}

/// Snapshot for a health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Classifier and label map agree on the class count.
    pub ok: bool,
    pub feature_dim: usize,
    pub sequence_len: usize,
    pub num_classes: usize,
    pub labels: usize,
    pub policy: PolicyKind,
    pub active_sessions: usize,
    pub metrics: DecisionMetrics,
}
