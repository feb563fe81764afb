//! Recognizer: extractor -> classifier -> label map -> decision engine.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use handsign_core::config::HandsignConfig;
use handsign_core::errors::{ConfigError, DecisionError, HandsignError, HandsignResult};
use handsign_core::models::Frame;
use handsign_core::traits::{IClassifier, IFeatureExtractor};
use handsign_core::{CandidateSet, LabelMap, LabelTexts, Verdict};
use handsign_decision::DecisionEngine;
use handsign_features::LandmarkExtractor;
use handsign_observability::tracing_setup::events;
use handsign_observability::DecisionMetrics;

use crate::dto::{HealthReport, RecognizeRequest, RecognizeResponse};

/// Recognition pipeline over one extractor, one classifier and one engine.
pub struct Recognizer<E, C> {
    extractor: E,
    classifier: C,
    labels: LabelMap,
    engine: DecisionEngine,
    default_session: String,
    metrics: Mutex<DecisionMetrics>,
}

impl<C: IClassifier> Recognizer<LandmarkExtractor, C> {
    /// Build the reference pipeline from config, loading the label map and
    /// label texts from the configured paths relative to `base_dir`.
    pub fn from_config(
        config: &HandsignConfig,
        classifier: C,
        base_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let labels = LabelMap::load(&base_dir.join(&config.labels.label_map_path))?;
        let texts = LabelTexts::load(&base_dir.join(&config.labels.label_text_path))?;
        let engine = DecisionEngine::from_config(config).with_texts(texts);
        let extractor = LandmarkExtractor::new(config.features.clone());

        Ok(Self::new(extractor, classifier, labels, engine)
            .with_default_session(config.session.default_session_id.clone()))
    }
}

impl<E: IFeatureExtractor, C: IClassifier> Recognizer<E, C> {
    pub fn new(extractor: E, classifier: C, labels: LabelMap, engine: DecisionEngine) -> Self {
        if classifier.num_classes() != labels.len() {
            tracing::warn!(
                classifier = classifier.num_classes(),
                labels = labels.len(),
                "classifier and label map disagree on class count"
            );
        }
        tracing::info!(
            feature_dim = extractor.feature_dim(),
            sequence_len = extractor.sequence_len(),
            classes = labels.len(),
            policy = %engine.policy_kind(),
            "recognizer initialized"
        );
        Self {
            extractor,
            classifier,
            labels,
            engine,
            default_session: handsign_core::config::defaults::DEFAULT_SESSION_ID.to_string(),
            metrics: Mutex::new(DecisionMetrics::new()),
        }
    }

    pub fn with_default_session(mut self, session_id: impl Into<String>) -> Self {
        self.default_session = session_id.into();
        self
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Fresh random session id for clients that do not bring their own.
    pub fn open_session(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Run one request through the pipeline. Never fails; every problem
    /// becomes an `error` verdict.
    pub fn recognize(&self, request: &RecognizeRequest, now: DateTime<Utc>) -> RecognizeResponse {
        let session_id = self.session_id(request);
        let frames_received = request.frames.len();
        let span = handsign_observability::recognize_span!(session_id, frames_received);
        let _guard = span.enter();

        let evicted = self.engine.sweep_idle(now);
        if evicted > 0 {
            events::sessions_evicted(evicted, self.engine.store().len());
            self.metrics().record_evictions(evicted);
        }

        let verdict = match self.candidates(&request.frames) {
            Ok(candidates) => self.decide(session_id, &candidates, request.force_final, now),
            Err(err) => self.reject(session_id, frames_received, err),
        };

        events::verdict_emitted(session_id, &verdict, frames_received);
        self.metrics().record_verdict(&verdict);

        RecognizeResponse {
            verdict,
            frames_received,
        }
    }

    /// Health snapshot, including a copy of the metrics.
    pub fn health(&self) -> HealthReport {
        HealthReport {
            ok: self.classifier.num_classes() == self.labels.len(),
            feature_dim: self.extractor.feature_dim(),
            sequence_len: self.extractor.sequence_len(),
            num_classes: self.classifier.num_classes(),
            labels: self.labels.len(),
            policy: self.engine.policy_kind(),
            active_sessions: self.engine.store().len(),
            metrics: self.metrics().clone(),
        }
    }

    pub fn metrics_snapshot(&self) -> DecisionMetrics {
        self.metrics().clone()
    }

    fn session_id<'a>(&'a self, request: &'a RecognizeRequest) -> &'a str {
        match request.session_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => &self.default_session,
        }
    }

    fn candidates(&self, frames: &[Frame]) -> HandsignResult<CandidateSet> {
        let features = self.extractor.extract(frames)?;
        let distribution = self.classifier.classify(&features)?;
        let top_k = self.engine.config().top_k;
        Ok(CandidateSet::from_distribution(&distribution, &self.labels, top_k)?)
    }

    fn decide(
        &self,
        session_id: &str,
        candidates: &CandidateSet,
        force_final: bool,
        now: DateTime<Utc>,
    ) -> Verdict {
        match self.engine.try_decide(session_id, candidates, force_final, now) {
            Ok(verdict) => verdict,
            Err(err) => {
                if err.is_fault() {
                    events::representation_fault(session_id, &err.to_string());
                    self.metrics().record_fault();
                }
                Verdict::error(self.engine.evidence(session_id))
            }
        }
    }

    fn reject(&self, session_id: &str, frames_received: usize, err: HandsignError) -> Verdict {
        match err {
            HandsignError::InsufficientInput(reason) => {
                events::insufficient_input(session_id, frames_received, &reason.to_string());
                self.metrics().record_insufficient_input();
                self.engine.reject(session_id, &DecisionError::from(reason))
            }
            other => {
                events::classifier_failed(session_id, &other.to_string());
                self.metrics().record_classifier_failure();
                Verdict::error(self.engine.evidence(session_id))
            }
        }
    }

    fn metrics(&self) -> MutexGuard<'_, DecisionMetrics> {
        self.metrics.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
