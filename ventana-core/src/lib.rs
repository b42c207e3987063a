//! Ventana Funnel Core
//!
//! Platform-agnostic logic for the Ventana quiz funnel: quiz answers and the
//! persisted session keys, the result-page reveal state machine, the session
//! countdown, attribution capture, and the personalised copy.
//! Browser concerns (timers, storage, analytics, the video embed) are reached
//! through the traits in [`storage`], [`analytics`] and [`embed`].

pub mod analytics;
pub mod answers;
pub mod attribution;
pub mod constants;
pub mod content;
pub mod countdown;
pub mod embed;
pub mod landing;
pub mod quiz;
pub mod reveal;
pub mod sim;
pub mod spots;
pub mod storage;
pub mod time;

// Re-export commonly used types
pub use analytics::{
    AnalyticsError, AnalyticsEvent, AnalyticsSink, EventParams, Page, RecordingSink, Revelation,
    VslAction, emit,
};
pub use answers::{AnswerField, Gender, QuizAnswers, UNSPECIFIED};
pub use attribution::{
    Attribution, capture_entry_attribution, checkout_link, is_recognized, restored_query,
};
pub use countdown::{
    Countdown, CountdownCfg, CountdownTick, SessionClock, SessionExpiry, format_clock,
    remaining_seconds,
};
pub use embed::{EmbedError, EmbedHost, EmbedOutcome, EmbedSpec, MemoryEmbedHost, ensure_embed};
pub use landing::{LandingConfig, VisitorCounter};
pub use quiz::{QUESTIONS, Question, QuizError, QuizOption, QuizProgress};
pub use reveal::{
    Cause, ConfigError, Effect, EffectHost, Observation, Phase, PhaseController, PhaseState,
    RevealConfig, Scope, Section, TimerKind, TimerToken, UnlockPacing, apply_effects,
};
pub use sim::SessionSim;
pub use spots::{SpotsConfig, SpotsCounter};
pub use storage::{FunnelStore, KeyValueStorage, MemoryStorage, StorageError};
pub use time::EpochMillis;
