//! Tunable reveal policy loaded from `static/config/reveal.json`.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHECKOUT_URL, DIAGNOSIS_AUTO_ADVANCE_MS, LOADING_DURATION_MS, OFFER_TIME_ON_PAGE_SECS,
    SCROLL_FOLLOW_UP_MS, URGENCY_FALLBACK_MS, VIDEO_FALLBACK_MS, VIDEO_SCROLL_MARGIN_PX,
    VIDEO_TIME_ON_PAGE_SECS, VIDEO_UNLOCK_FIXED_MS,
};
use crate::countdown::CountdownCfg;
use crate::embed::EmbedSpec;
use crate::spots::SpotsConfig;

const DEFAULT_REVEAL_DATA: &str =
    include_str!("../../../ventana-web/static/config/reveal.json");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reveal config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid reveal config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisCfg {
    /// Advance to `Video` this long after entering `Diagnosis`.
    pub auto_advance_ms: Option<u64>,
    /// Show a "continue" control that advances immediately.
    pub manual_continue: bool,
}

impl Default for DiagnosisCfg {
    fn default() -> Self {
        Self {
            auto_advance_ms: Some(DIAGNOSIS_AUTO_ADVANCE_MS),
            manual_continue: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoCfg {
    pub fallback_ms: Option<u64>,
    /// How far past the viewport top the video section's bottom edge must be.
    pub scroll_margin_px: Option<f64>,
    pub time_on_page_secs: Option<u64>,
    pub unlock: UnlockPacing,
}

impl Default for VideoCfg {
    fn default() -> Self {
        Self {
            fallback_ms: Some(VIDEO_FALLBACK_MS),
            scroll_margin_px: Some(VIDEO_SCROLL_MARGIN_PX),
            time_on_page_secs: Some(VIDEO_TIME_ON_PAGE_SECS),
            unlock: UnlockPacing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyCfg {
    pub fallback_ms: Option<u64>,
    /// Show a "reveal" control that jumps straight to the offer.
    pub manual_reveal: bool,
    pub time_on_page_secs: Option<u64>,
}

impl Default for UrgencyCfg {
    fn default() -> Self {
        Self {
            fallback_ms: Some(URGENCY_FALLBACK_MS),
            manual_reveal: true,
            time_on_page_secs: Some(OFFER_TIME_ON_PAGE_SECS),
        }
    }
}

/// Delay between entering `Video` and mounting the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum UnlockPacing {
    Fixed { delay_ms: u64 },
    /// Drip-feed: the faster the visitor got through `Diagnosis`, the longer
    /// the wait.
    Paced,
}

impl Default for UnlockPacing {
    fn default() -> Self {
        Self::Fixed {
            delay_ms: VIDEO_UNLOCK_FIXED_MS,
        }
    }
}

impl UnlockPacing {
    #[must_use]
    pub const fn delay_after(self, diagnosis_dwell: Duration) -> Duration {
        match self {
            Self::Fixed { delay_ms } => Duration::from_millis(delay_ms),
            Self::Paced => {
                let secs = diagnosis_dwell.as_secs();
                if secs < 10 {
                    Duration::from_secs(3)
                } else if secs < 30 {
                    Duration::from_secs(5)
                } else {
                    Duration::from_secs(8)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutCfg {
    pub base_url: String,
}

impl Default for CheckoutCfg {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHECKOUT_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub loading_ms: u64,
    pub diagnosis: DiagnosisCfg,
    pub video: VideoCfg,
    pub urgency: UrgencyCfg,
    /// Scroll a freshly revealed Diagnosis or Video section into view after this delay.
    pub scroll_follow_up_ms: u64,
    pub countdown: CountdownCfg,
    pub spots: SpotsConfig,
    pub checkout: CheckoutCfg,
    pub embed: EmbedSpec,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            loading_ms: LOADING_DURATION_MS,
            diagnosis: DiagnosisCfg::default(),
            video: VideoCfg::default(),
            urgency: UrgencyCfg::default(),
            scroll_follow_up_ms: SCROLL_FOLLOW_UP_MS,
            countdown: CountdownCfg::default(),
            spots: SpotsConfig::default(),
            checkout: CheckoutCfg::default(),
            embed: EmbedSpec::default(),
        }
    }
}

impl RevealConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or describes a policy that
    /// could stall the reveal.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse `json`, falling back to [`Self::default_config`] on any error.
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            log::warn!("falling back to default reveal config: {err}");
            Self::default_config()
        })
    }

    /// The bundled `reveal.json`.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json_or_default(DEFAULT_REVEAL_DATA)
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loading_ms == 0 {
            return Err(ConfigError::Invalid("loading_ms must be positive"));
        }
        if self.diagnosis.auto_advance_ms.is_none() && !self.diagnosis.manual_continue {
            return Err(ConfigError::Invalid(
                "diagnosis needs auto_advance_ms or manual_continue",
            ));
        }
        if self.video.fallback_ms.is_none()
            && self.video.scroll_margin_px.is_none()
            && self.video.time_on_page_secs.is_none()
        {
            return Err(ConfigError::Invalid("video needs at least one exit trigger"));
        }
        if self.video.scroll_margin_px.is_some_and(|px| !px.is_finite() || px < 0.0) {
            return Err(ConfigError::Invalid("scroll_margin_px must be a non-negative number"));
        }
        if self.urgency.fallback_ms.is_none()
            && !self.urgency.manual_reveal
            && self.urgency.time_on_page_secs.is_none()
        {
            return Err(ConfigError::Invalid(
                "urgency window needs fallback_ms, manual_reveal or time_on_page_secs",
            ));
        }
        if let (Some(video), Some(offer)) = (
            self.video.time_on_page_secs,
            self.urgency.time_on_page_secs,
        ) && offer < video
        {
            return Err(ConfigError::Invalid(
                "offer time-on-page threshold is below the video threshold",
            ));
        }
        if self.spots.floor > self.spots.initial {
            return Err(ConfigError::Invalid("spots floor exceeds the initial count"));
        }
        if self.spots.interval_secs == 0 {
            return Err(ConfigError::Invalid("spots interval_secs must be positive"));
        }
        if self.countdown.deadline_secs == 0 {
            return Err(ConfigError::Invalid("countdown deadline_secs must be positive"));
        }
        Ok(())
    }

    #[must_use]
    pub const fn loading_duration(&self) -> Duration {
        Duration::from_millis(self.loading_ms)
    }

    #[must_use]
    pub const fn scroll_follow_up(&self) -> Duration {
        Duration::from_millis(self.scroll_follow_up_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let bundled = RevealConfig::from_json(DEFAULT_REVEAL_DATA).unwrap();
        assert_eq!(bundled, RevealConfig::default_config());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg = RevealConfig::from_json(r#"{"loading_ms": 6500, "diagnosis": {"manual_continue": true}}"#)
            .unwrap();
        assert_eq!(cfg.loading_ms, 6_500);
        assert!(cfg.diagnosis.manual_continue);
        assert_eq!(cfg.diagnosis.auto_advance_ms, Some(DIAGNOSIS_AUTO_ADVANCE_MS));
        assert_eq!(cfg.urgency.time_on_page_secs, Some(OFFER_TIME_ON_PAGE_SECS));
    }

    #[test]
    fn rejects_policies_that_stall() {
        let stalled = r#"{"diagnosis": {"auto_advance_ms": null, "manual_continue": false}}"#;
        assert!(matches!(
            RevealConfig::from_json(stalled),
            Err(ConfigError::Invalid(_))
        ));

        let mut cfg = RevealConfig::default();
        cfg.urgency = UrgencyCfg {
            fallback_ms: None,
            manual_reveal: false,
            time_on_page_secs: None,
        };
        assert!(cfg.validate().is_err());

        let mut cfg = RevealConfig::default();
        cfg.spots.floor = 60;
        assert!(cfg.validate().is_err());

        let mut cfg = RevealConfig::default();
        cfg.urgency.time_on_page_secs = Some(60);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_falls_back() {
        assert!(matches!(
            RevealConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            RevealConfig::from_json_or_default(r#"{"loading_ms": 0}"#),
            RevealConfig::default()
        );
    }

    #[test]
    fn paced_unlock_tiers() {
        let paced = UnlockPacing::Paced;
        assert_eq!(paced.delay_after(Duration::from_secs(4)), Duration::from_secs(3));
        assert_eq!(paced.delay_after(Duration::from_secs(10)), Duration::from_secs(5));
        assert_eq!(paced.delay_after(Duration::from_secs(29)), Duration::from_secs(5));
        assert_eq!(paced.delay_after(Duration::from_secs(30)), Duration::from_secs(8));
        assert_eq!(
            UnlockPacing::default().delay_after(Duration::from_secs(30)),
            Duration::from_millis(500)
        );
    }
}
