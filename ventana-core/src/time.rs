//! Wall-clock instants as seen by the host environment.
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Milliseconds since the Unix epoch, as reported by the host clock.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EpochMillis(u64);

impl EpochMillis {
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, clamped to zero when the host clock went backwards.
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    #[must_use]
    pub fn after(self, delay: Duration) -> Self {
        let delta = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(delta))
    }

    /// Parse the decimal representation used in persistent storage.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().map(Self)
    }
}

impl std::fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_clamps_when_clock_moves_backwards() {
        let later = EpochMillis::from_millis(10_000);
        let earlier = EpochMillis::from_millis(4_000);
        assert_eq!(later.saturating_since(earlier), Duration::from_secs(6));
        assert_eq!(earlier.saturating_since(later), Duration::ZERO);
    }

    #[test]
    fn parse_accepts_stored_decimal_strings() {
        assert_eq!(
            EpochMillis::parse(" 1700000000000 "),
            Some(EpochMillis::from_millis(1_700_000_000_000))
        );
        assert_eq!(EpochMillis::parse("yesterday"), None);
        assert_eq!(EpochMillis::parse(""), None);
    }

    #[test]
    fn after_adds_duration() {
        let start = EpochMillis::from_millis(1_000);
        assert_eq!(
            start.after(Duration::from_millis(2_500)),
            EpochMillis::from_millis(3_500)
        );
    }
}
