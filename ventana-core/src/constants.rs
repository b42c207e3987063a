//! Centralized keys and tuning constants for the Ventana funnel.
//!
//! Storage keys are shared with previously deployed builds of the funnel,
//! so renaming any of them orphans data already sitting in visitors'
//! browsers.

// Storage keys -------------------------------------------------------------
pub const KEY_QUIZ_DATA: &str = "quiz_data";
pub const KEY_SPOTS_LEFT: &str = "quiz_spots_left";
pub const KEY_TIMER_START: &str = "quiz_timer_start";
pub const KEY_ATTRIBUTION: &str = "quiz_utms";
pub const KEY_USER_COUNT: &str = "quiz_user_count";

// Countdown ----------------------------------------------------------------
/// Lifetime of a result session, in seconds (47 minutes).
pub const DEADLINE_SECONDS: u64 = 2_820;
pub const EXPIRY_MESSAGE: &str =
    "Tu análisis ha expirado. Por favor, completa el quiz nuevamente.";
pub const ENTRY_PATH: &str = "/";

// Phase timings (milliseconds) -------------------------------------------
pub const LOADING_DURATION_MS: u64 = 2_500;
pub const DIAGNOSIS_AUTO_ADVANCE_MS: u64 = 9_500;
pub const VIDEO_FALLBACK_MS: u64 = 53_000;
pub const VIDEO_SCROLL_MARGIN_PX: f64 = 100.0;
pub const VIDEO_TIME_ON_PAGE_SECS: u64 = 128;
pub const URGENCY_FALLBACK_MS: u64 = 10_000;
pub const OFFER_TIME_ON_PAGE_SECS: u64 = 300;
pub const SCROLL_FOLLOW_UP_MS: u64 = 300;
pub const VIDEO_UNLOCK_FIXED_MS: u64 = 500;

// Spots --------------------------------------------------------------------
pub const SPOTS_INITIAL: u32 = 50;
pub const SPOTS_FLOOR: u32 = 15;
pub const SPOTS_INTERVAL_SECS: u64 = 45;
pub const SPOTS_ALERT_THRESHOLDS: [u32; 3] = [20, 10, 5];

// Landing ------------------------------------------------------------------
pub const LANDING_BASE_USERS: u32 = 1_200;
pub const LANDING_BUMP_INTERVAL_MS: u64 = 5_000;
pub const LANDING_MAX_BUMP: u32 = 3;
pub const LANDING_SCROLL_DEPTH_PCT: u8 = 50;

// Checkout / embed ---------------------------------------------------------
pub const DEFAULT_CHECKOUT_URL: &str = "https://pay.hotmart.com/ventana-72h";
pub const DEFAULT_PLAYER_ID: &str = "vid-6946ae0a8fd5231b631d81f0";
pub const DEFAULT_PLAYER_SCRIPT: &str = "https://scripts.converteai.net/ea3c2dc1-1976-40a2-b0fb-c5055f82bfaf/players/6946ae0a8fd5231b631d81f0/v4/player.js";
pub const DEFAULT_PLAYER_CONTAINER: &str = ".vsl-placeholder";
