//! Cosmetic "spots left" scarcity counter.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analytics::AnalyticsEvent;
use crate::constants::{SPOTS_ALERT_THRESHOLDS, SPOTS_FLOOR, SPOTS_INITIAL, SPOTS_INTERVAL_SECS};
use crate::storage::{FunnelStore, KeyValueStorage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotsConfig {
    pub initial: u32,
    pub floor: u32,
    pub interval_secs: u64,
    pub alert_at: Vec<u32>,
}

impl Default for SpotsConfig {
    fn default() -> Self {
        Self {
            initial: SPOTS_INITIAL,
            floor: SPOTS_FLOOR,
            interval_secs: SPOTS_INTERVAL_SECS,
            alert_at: SPOTS_ALERT_THRESHOLDS.to_vec(),
        }
    }
}

impl SpotsConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotsCounter {
    remaining: u32,
    floor: u32,
    alert_at: Vec<u32>,
}

impl SpotsCounter {
    /// Load the persisted counter, initialising it on first visit. A stored
    /// value above the configured initial is clamped down: the counter never
    /// grows.
    pub fn load<S: KeyValueStorage>(store: &FunnelStore<S>, cfg: &SpotsConfig) -> Self {
        let remaining = match store.spots_left() {
            Some(stored) if stored <= cfg.initial => stored,
            Some(stored) => {
                log::debug!("clamping stored spots {stored} to {}", cfg.initial);
                store.set_spots_left(cfg.initial);
                cfg.initial
            }
            None => {
                store.set_spots_left(cfg.initial);
                cfg.initial
            }
        };
        Self {
            remaining,
            floor: cfg.floor,
            alert_at: cfg.alert_at.clone(),
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn at_floor(&self) -> bool {
        self.remaining <= self.floor
    }

    /// Take one spot, persisting the new value. Returns an alert event when
    /// the new value is one of the alert thresholds.
    pub fn tick<S: KeyValueStorage>(&mut self, store: &FunnelStore<S>) -> Option<AnalyticsEvent> {
        if self.at_floor() {
            return None;
        }
        self.remaining -= 1;
        store.set_spots_left(self.remaining);
        self.alert_at
            .contains(&self.remaining)
            .then_some(AnalyticsEvent::SpotsAlert {
                remaining: self.remaining,
            })
    }
}
