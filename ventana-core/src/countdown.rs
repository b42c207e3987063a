//! Session deadline derived from a persisted start instant.
//!
//! The remaining time is always recomputed from the stored start rather than
//! kept as a decrementing counter, so it survives reloads and cannot drift
//! while the tab is suspended.
use serde::{Deserialize, Serialize};

use crate::constants::{DEADLINE_SECONDS, ENTRY_PATH, EXPIRY_MESSAGE};
use crate::reveal::Phase;
use crate::storage::{FunnelStore, KeyValueStorage};
use crate::time::EpochMillis;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownCfg {
    pub deadline_secs: u64,
    /// Where an expired session is sent back to.
    pub entry_path: String,
}

impl Default for CountdownCfg {
    fn default() -> Self {
        Self {
            deadline_secs: DEADLINE_SECONDS,
            entry_path: ENTRY_PATH.to_string(),
        }
    }
}

/// `max(0, deadline − (now − started_at))` in whole seconds.
#[must_use]
pub const fn remaining_seconds(started_at: EpochMillis, now: EpochMillis, deadline_secs: u64) -> u64 {
    let elapsed = now.saturating_since(started_at).as_secs();
    deadline_secs.saturating_sub(elapsed)
}

/// `m:ss` rendering used by the urgency bar and sticky footer.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// The instant the current result session began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    started_at: EpochMillis,
}

impl SessionClock {
    /// Resume the persisted clock, or start (and persist) one at `now`.
    pub fn resume_or_start<S: KeyValueStorage>(store: &FunnelStore<S>, now: EpochMillis) -> Self {
        if let Some(started_at) = store.session_clock_start() {
            log::debug!("resuming session clock started at {started_at}");
            return Self { started_at };
        }
        store.set_session_clock_start(now);
        log::debug!("started session clock at {now}");
        Self { started_at: now }
    }

    #[must_use]
    pub const fn started_at(&self) -> EpochMillis {
        self.started_at
    }
}

/// Terminal action for an expired session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpiry {
    pub message: &'static str,
    pub redirect_to: String,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownTick {
    Running { remaining_secs: u64 },
    /// Deadline reached past `Loading`; returned exactly once.
    Expired(SessionExpiry),
    /// Expiry already fired; the host should stop ticking.
    Spent,
}

/// Once-per-second urgency countdown, independent of the reveal phase.
#[derive(Debug, Clone)]
pub struct Countdown {
    clock: SessionClock,
    cfg: CountdownCfg,
    fired: bool,
}

impl Countdown {
    #[must_use]
    pub const fn new(clock: SessionClock, cfg: CountdownCfg) -> Self {
        Self {
            clock,
            cfg,
            fired: false,
        }
    }

    /// Resume the persisted session clock (starting one if absent) and wrap it.
    pub fn resume<S: KeyValueStorage>(
        store: &FunnelStore<S>,
        now: EpochMillis,
        cfg: CountdownCfg,
    ) -> Self {
        Self::new(SessionClock::resume_or_start(store, now), cfg)
    }

    #[must_use]
    pub const fn clock(&self) -> SessionClock {
        self.clock
    }

    #[must_use]
    pub const fn remaining_secs(&self, now: EpochMillis) -> u64 {
        remaining_seconds(self.clock.started_at, now, self.cfg.deadline_secs)
    }

    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }

    /// Advance the countdown. At zero, and only once the reveal has left
    /// `Loading`, the persisted clock is cleared and the expiry is returned.
    pub fn tick<S: KeyValueStorage>(
        &mut self,
        store: &FunnelStore<S>,
        now: EpochMillis,
        phase: Phase,
    ) -> CountdownTick {
        if self.fired {
            return CountdownTick::Spent;
        }
        let remaining_secs = self.remaining_secs(now);
        if remaining_secs > 0 || phase == Phase::Loading {
            return CountdownTick::Running { remaining_secs };
        }
        self.fired = true;
        store.clear_session_clock_start();
        log::info!("session expired during {phase:?}; returning to {}", self.cfg.entry_path);
        CountdownTick::Expired(SessionExpiry {
            message: EXPIRY_MESSAGE,
            redirect_to: self.cfg.entry_path.clone(),
            phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const T0: u64 = 1_700_000_000_000;

    fn at(secs: u64) -> EpochMillis {
        EpochMillis::from_millis(T0 + secs * 1_000)
    }

    #[test]
    fn remaining_is_clamped_formula() {
        assert_eq!(remaining_seconds(at(0), at(0), DEADLINE_SECONDS), 2_820);
        assert_eq!(remaining_seconds(at(0), at(600), DEADLINE_SECONDS), 2_220);
        assert_eq!(remaining_seconds(at(0), at(2_820), DEADLINE_SECONDS), 0);
        assert_eq!(remaining_seconds(at(0), at(9_000), DEADLINE_SECONDS), 0);
        // Partial seconds do not count as elapsed.
        let almost = EpochMillis::from_millis(T0 + 999);
        assert_eq!(remaining_seconds(at(0), almost, DEADLINE_SECONDS), 2_820);
    }

    #[test]
    fn clock_is_created_once_and_resumed() {
        let store = FunnelStore::new(MemoryStorage::new());
        let first = SessionClock::resume_or_start(&store, at(0));
        let second = SessionClock::resume_or_start(&store, at(100));
        assert_eq!(first.started_at(), at(0));
        assert_eq!(second.started_at(), at(0));
    }

    #[test]
    fn expiry_waits_for_loading_to_finish_and_fires_once() {
        let store = FunnelStore::new(MemoryStorage::new());
        let mut countdown = Countdown::resume(&store, at(0), CountdownCfg::default());

        assert_eq!(
            countdown.tick(&store, at(2_820), Phase::Loading),
            CountdownTick::Running { remaining_secs: 0 }
        );
        assert!(store.session_clock_start().is_some());

        let tick = countdown.tick(&store, at(2_821), Phase::Diagnosis);
        let CountdownTick::Expired(expiry) = tick else {
            panic!("expected expiry, got {tick:?}");
        };
        assert_eq!(expiry.redirect_to, "/");
        assert_eq!(expiry.phase, Phase::Diagnosis);
        assert!(store.session_clock_start().is_none());

        assert_eq!(
            countdown.tick(&store, at(2_822), Phase::Diagnosis),
            CountdownTick::Spent
        );
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_clock(2_820), "47:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(0), "0:00");
    }
}
