//! Landing-page "users being analysed" counter.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    LANDING_BASE_USERS, LANDING_BUMP_INTERVAL_MS, LANDING_MAX_BUMP, LANDING_SCROLL_DEPTH_PCT,
};
use crate::storage::{FunnelStore, KeyValueStorage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub base_users: u32,
    pub bump_interval_ms: u64,
    pub max_bump: u32,
    /// Reported once the CTA section is this far into view.
    pub scroll_depth_pct: u8,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            base_users: LANDING_BASE_USERS,
            bump_interval_ms: LANDING_BUMP_INTERVAL_MS,
            max_bump: LANDING_MAX_BUMP,
            scroll_depth_pct: LANDING_SCROLL_DEPTH_PCT,
        }
    }
}

impl LandingConfig {
    #[must_use]
    pub const fn bump_interval(&self) -> Duration {
        Duration::from_millis(self.bump_interval_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorCounter {
    count: u32,
    max_bump: u32,
}

impl VisitorCounter {
    /// Persisted count, or the configured base on a first visit.
    pub fn load<S: KeyValueStorage>(store: &FunnelStore<S>, cfg: &LandingConfig) -> Self {
        Self {
            count: store.user_count().unwrap_or(cfg.base_users),
            max_bump: cfg.max_bump.max(1),
        }
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Add a random 1..=max_bump and persist the new count.
    pub fn bump<R: Rng + ?Sized, S: KeyValueStorage>(
        &mut self,
        rng: &mut R,
        store: &FunnelStore<S>,
    ) -> u32 {
        self.count = self
            .count
            .saturating_add(rng.gen_range(1..=self.max_bump));
        store.set_user_count(self.count);
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn starts_from_base_and_persists_bumps() {
        let store = FunnelStore::new(MemoryStorage::new());
        let cfg = LandingConfig::default();
        let mut counter = VisitorCounter::load(&store, &cfg);
        assert_eq!(counter.count(), 1_200);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut previous = counter.count();
        for _ in 0..50 {
            let next = counter.bump(&mut rng, &store);
            assert!((1..=3).contains(&(next - previous)));
            previous = next;
        }
        assert_eq!(store.user_count(), Some(previous));
        assert_eq!(VisitorCounter::load(&store, &cfg).count(), previous);
    }
}
