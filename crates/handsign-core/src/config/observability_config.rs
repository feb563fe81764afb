use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter used when the log environment variable is unset.
    pub log_level: String,
    /// Environment variable holding an `EnvFilter` directive.
    pub log_env: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            log_env: defaults::DEFAULT_LOG_ENV.to_string(),
            json: true,
        }
    }
}
