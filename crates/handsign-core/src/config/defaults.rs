// Single source of truth for all default values.

// --- Decision ---
pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_BASE_THRESHOLD: f64 = 0.60;
pub const DEFAULT_VOTE_MIN_RATIO: f64 = 0.60;
pub const DEFAULT_MIN_AVG_PROB: f64 = 0.60;
pub const DEFAULT_COOLDOWN_SECS: f64 = 0.7;
pub const DEFAULT_STREAK_N: u32 = 8;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_RANK_WEIGHTS: [f64; 5] = [1.0, 0.6, 0.35, 0.2, 0.1];

// --- Session ---
pub const DEFAULT_SESSION_TTL_SECS: f64 = 30.0;
pub const DEFAULT_SWEEP_INTERVAL_SECS: f64 = 0.0; // sweep before every decision
pub const DEFAULT_SESSION_ID: &str = "default";

// --- Features ---
pub const DEFAULT_SEQUENCE_LEN: usize = 30;
pub const DEFAULT_USE_FACE: bool = false;
pub const DEFAULT_HAND_NORM: bool = true;
pub const DEFAULT_MIRRORED: bool = false;
pub const DEFAULT_MAX_ZERO_RATIO: f64 = 0.6;
pub const HAND_POINTS: usize = 21;
pub const FACE_POINTS: usize = 70;

// --- Labels ---
pub const DEFAULT_LABEL_MAP_PATH: &str = "current/label_map.json";
pub const DEFAULT_LABEL_TEXT_PATH: &str = "current/label_to_text.json";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_ENV: &str = "HANDSIGN_LOG";
