//! Configuration for every handsign subsystem.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`HANDSIGN_*`)
//! 2. TOML config file
//! 3. Compiled defaults (`defaults`)

pub mod decision_config;
pub mod defaults;
pub mod feature_config;
pub mod label_config;
pub mod observability_config;
pub mod session_config;

pub use decision_config::{DecisionConfig, PolicyKind};
pub use feature_config::FeatureConfig;
pub use label_config::LabelConfig;
pub use observability_config::ObservabilityConfig;
pub use session_config::SessionConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandsignConfig {
    pub decision: DecisionConfig,
    pub session: SessionConfig,
    pub features: FeatureConfig,
    pub labels: LabelConfig,
    pub observability: ObservabilityConfig,
}

impl HandsignConfig {
    /// Load configuration from an optional TOML file, then apply `HANDSIGN_*`
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing sections and keys keep
    /// their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
            let raw = raw?;
            match raw.trim().parse::<T>() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(key = %key, value = %raw, "ignoring unparsable config override");
                    None
                }
            }
        }
        fn flag(key: &str, raw: Option<String>) -> Option<bool> {
            let raw = raw?;
            match raw.trim() {
                "1" | "true" | "TRUE" | "True" => Some(true),
                "0" | "false" | "FALSE" | "False" => Some(false),
                _ => {
                    tracing::warn!(key = %key, value = %raw, "ignoring unparsable config flag");
                    None
                }
            }
        }

        let get = |key: &str| lookup(key);

        if let Some(v) = parse("HANDSIGN_POLICY", get("HANDSIGN_POLICY")) {
            self.decision.policy = v;
        }
        if let Some(v) = parse("HANDSIGN_WINDOW_SIZE", get("HANDSIGN_WINDOW_SIZE")) {
            self.decision.window_size = v;
        }
        if let Some(v) = parse("HANDSIGN_THRESHOLD", get("HANDSIGN_THRESHOLD")) {
            self.decision.base_threshold = v;
        }
        if let Some(v) = parse("HANDSIGN_VOTE_MIN_RATIO", get("HANDSIGN_VOTE_MIN_RATIO")) {
            self.decision.vote_min_ratio = v;
        }
        if let Some(v) = parse("HANDSIGN_MIN_AVG_PROB", get("HANDSIGN_MIN_AVG_PROB")) {
            self.decision.min_avg_prob = v;
        }
        if let Some(v) = parse("HANDSIGN_COOLDOWN_SECS", get("HANDSIGN_COOLDOWN_SECS")) {
            self.decision.cooldown_secs = v;
        }
        if let Some(v) = parse("HANDSIGN_STREAK_N", get("HANDSIGN_STREAK_N")) {
            self.decision.streak_n = v;
        }
        if let Some(v) = parse("HANDSIGN_TOP_K", get("HANDSIGN_TOP_K")) {
            self.decision.top_k = v;
        }
        if let Some(v) = parse("HANDSIGN_SESSION_TTL_SECS", get("HANDSIGN_SESSION_TTL_SECS")) {
            self.session.ttl_secs = v;
        }
        if let Some(v) = parse("HANDSIGN_SEQUENCE_LEN", get("HANDSIGN_SEQUENCE_LEN")) {
            self.features.sequence_len = v;
        }
        if let Some(v) = flag("HANDSIGN_USE_FACE", get("HANDSIGN_USE_FACE")) {
            self.features.use_face = v;
        }
        if let Some(v) = flag("HANDSIGN_HAND_NORM", get("HANDSIGN_HAND_NORM")) {
            self.features.hand_norm = v;
        }
        if let Some(v) = flag("HANDSIGN_MIRRORED", get("HANDSIGN_MIRRORED")) {
            self.features.mirrored = v;
        }
        if let Some(v) = get("HANDSIGN_LABEL_MAP") {
            self.labels.label_map_path = v;
        }
        if let Some(v) = get("HANDSIGN_LABEL_TEXT") {
            self.labels.label_text_path = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.decision;
        check_unit("decision.base_threshold", d.base_threshold)?;
        check_unit("decision.vote_min_ratio", d.vote_min_ratio)?;
        check_unit("decision.min_avg_prob", d.min_avg_prob)?;
        check_unit("features.max_zero_ratio", self.features.max_zero_ratio)?;
        check_positive("decision.window_size", d.window_size)?;
        check_positive("decision.top_k", d.top_k)?;
        check_positive("decision.streak_n", d.streak_n as usize)?;
        check_positive("features.sequence_len", self.features.sequence_len)?;
        check_non_negative("decision.cooldown_secs", d.cooldown_secs)?;
        check_non_negative("session.ttl_secs", self.session.ttl_secs)?;
        check_non_negative("session.sweep_interval_secs", self.session.sweep_interval_secs)?;
        if self.session.sweep_interval_secs > self.session.ttl_secs {
            return Err(ConfigError::ValidationFailed {
                field: "session.sweep_interval_secs".to_string(),
                message: "must not exceed session.ttl_secs".to_string(),
            });
        }

        if d.rank_weights.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "decision.rank_weights".to_string(),
                message: "must contain at least one weight".to_string(),
            });
        }
        if d.rank_weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::ValidationFailed {
                field: "decision.rank_weights".to_string(),
                message: "weights must be finite and non-negative".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(())
}

fn check_positive(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be a finite, non-negative number of seconds".to_string(),
        });
    }
    Ok(())
}
