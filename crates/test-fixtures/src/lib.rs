//! Test fixture loader for handsign golden datasets: label maps, decision
//! scenarios, and landmark frames.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the golden fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

// ── Decision scenarios ───────────────────────────────────────────────────

/// A scripted request stream with the verdict expected after each step.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionScenario {
    pub description: String,
    /// `"window"` or `"streak"`.
    pub policy: String,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioStep {
    /// Milliseconds after the scenario start.
    pub offset_ms: i64,
    #[serde(default = "default_session")]
    pub session_id: String,
    /// `(label, probability)` pairs, best first.
    pub candidates: Vec<(String, f64)>,
    #[serde(default)]
    pub force_final: bool,
    pub expect: StepExpectation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepExpectation {
    /// `"pending"`, `"final"` or `"error"`.
    pub mode: String,
    pub label: Option<String>,
    pub evidence: Option<usize>,
}

fn default_session() -> String {
    "default".to_string()
}

/// Load every scenario under `decision/`.
pub fn decision_scenarios() -> Vec<(PathBuf, DecisionScenario)> {
    list_fixtures("decision")
        .into_iter()
        .map(|path| {
            let name = path
                .strip_prefix(fixtures_root())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| path.display().to_string());
            let scenario = load_fixture(&name);
            (path, scenario)
        })
        .collect()
}
