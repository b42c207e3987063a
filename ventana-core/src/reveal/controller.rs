//! The reveal state machine.
//!
//! [`PhaseController`] never touches timers or the document itself. Each
//! trigger method returns the [`Effect`]s the host must carry out, in order.
//! Transitions go through a single guard so that racing triggers (timer,
//! scroll listener, time-on-page poll, button) produce each phase's entry
//! effects exactly once.
use std::time::Duration;

use crate::analytics::{AnalyticsEvent, Revelation, VslAction};
use crate::reveal::config::RevealConfig;
use crate::reveal::effect::{Effect, Scope, TimerKind, TimerToken};
use crate::reveal::phase::{Phase, Section};
use crate::time::EpochMillis;

/// What made a transition happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cause {
    Timer,
    Scroll,
    TimeOnPage,
    Manual,
}

/// Layout sample taken by the host on scroll and on every poll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Observation {
    /// Bottom edge of the video section relative to the viewport top, in
    /// CSS pixels. Negative once scrolled past. `None` while not rendered.
    pub video_bottom_px: Option<f64>,
}

impl Observation {
    #[must_use]
    pub const fn video_bottom(px: f64) -> Self {
        Self {
            video_bottom_px: Some(px),
        }
    }
}

/// Snapshot of reveal progress. Never persisted: a reload starts over at `Loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseState {
    phase: Phase,
    entered_at: [Option<EpochMillis>; Phase::ALL.len()],
    video_unlocked: bool,
    offer_revealed: bool,
}

impl PhaseState {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn entered_at(&self, phase: Phase) -> Option<EpochMillis> {
        self.entered_at[phase.index()]
    }

    #[must_use]
    pub const fn has_entered(&self, phase: Phase) -> bool {
        self.entered_at(phase).is_some()
    }

    /// Time spent in `phase`: up to `now` if current, up to the next entry otherwise.
    #[must_use]
    pub fn dwell(&self, phase: Phase, now: EpochMillis) -> Duration {
        let Some(start) = self.entered_at(phase) else {
            return Duration::ZERO;
        };
        let end = phase
            .next()
            .and_then(|next| self.entered_at(next))
            .unwrap_or(now);
        end.saturating_since(start)
    }

    #[must_use]
    pub const fn video_unlocked(&self) -> bool {
        self.video_unlocked
    }

    #[must_use]
    pub const fn offer_revealed(&self) -> bool {
        self.offer_revealed
    }

    /// Whether `phase`'s section has been revealed (sections stay visible).
    #[must_use]
    pub fn shows(&self, phase: Phase) -> bool {
        self.phase >= phase
    }

    fn enter(&mut self, phase: Phase, now: EpochMillis) {
        self.phase = phase;
        self.entered_at[phase.index()] = Some(now);
    }
}

#[derive(Debug, Clone)]
pub struct PhaseController {
    cfg: RevealConfig,
    state: PhaseState,
    mounted_at: Option<EpochMillis>,
    video_injected: bool,
}

impl PhaseController {
    #[must_use]
    pub fn new(cfg: RevealConfig) -> Self {
        Self {
            cfg,
            state: PhaseState::default(),
            mounted_at: None,
            video_injected: false,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RevealConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn state(&self) -> &PhaseState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn time_on_page(&self, now: EpochMillis) -> Duration {
        self.mounted_at
            .map_or(Duration::ZERO, |mounted| now.saturating_since(mounted))
    }

    /// Whether the "continue" control should be offered right now.
    #[must_use]
    pub fn awaiting_continue(&self) -> bool {
        self.state.phase == Phase::Diagnosis && self.cfg.diagnosis.manual_continue
    }

    /// Whether the "reveal offer" control should be offered right now.
    #[must_use]
    pub fn can_reveal_offer(&self) -> bool {
        self.state.phase == Phase::UrgencyWindow && self.cfg.urgency.manual_reveal
    }

    /// Start the page: enter `Loading` and arm its timer. Mounting twice is a no-op.
    pub fn mount(&mut self, now: EpochMillis) -> Vec<Effect> {
        if self.mounted_at.is_some() {
            return Vec::new();
        }
        self.mounted_at = Some(now);
        self.state.enter(Phase::Loading, now);
        log::debug!("reveal mounted at {now}");
        self.arm_advance(Phase::Loading).into_iter().collect()
    }

    pub fn on_timer(&mut self, token: TimerToken, now: EpochMillis) -> Vec<Effect> {
        if let Scope::Phase(owner) = token.scope
            && owner != self.state.phase
        {
            log::debug!("ignoring stale {:?} timer from {owner:?}", token.kind);
            return Vec::new();
        }
        match (token.kind, token.scope) {
            (TimerKind::Advance, Scope::Phase(owner)) => match owner.next() {
                Some(target) => self.advance_to(target, Cause::Timer, now),
                None => Vec::new(),
            },
            (TimerKind::Advance, Scope::Page) => Vec::new(),
            (TimerKind::ScrollFollowUp(section), _) => vec![Effect::ScrollTo(section)],
            (TimerKind::UnlockVideo, _) => self.unlock_video(),
        }
    }

    /// Evaluate scroll- and time-based triggers. Several transitions may
    /// happen in one call when more than one threshold has been crossed.
    pub fn observe(&mut self, obs: Observation, now: EpochMillis) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some((target, cause)) = self.observed_trigger(obs, now) {
            let step = self.advance_to(target, cause, now);
            if step.is_empty() {
                break;
            }
            effects.extend(step);
        }
        effects
    }

    pub fn confirm_continue(&mut self, now: EpochMillis) -> Vec<Effect> {
        if !self.awaiting_continue() {
            log::debug!("continue ignored in {:?}", self.state.phase);
            return Vec::new();
        }
        self.advance_to(Phase::Video, Cause::Manual, now)
    }

    pub fn reveal_offer(&mut self, now: EpochMillis) -> Vec<Effect> {
        if !self.can_reveal_offer() {
            log::debug!("reveal ignored in {:?}", self.state.phase);
            return Vec::new();
        }
        self.advance_to(Phase::Offer, Cause::Manual, now)
    }

    fn observed_trigger(&self, obs: Observation, now: EpochMillis) -> Option<(Phase, Cause)> {
        let on_page = self.time_on_page(now).as_secs();
        match self.state.phase {
            Phase::Video => {
                let video = &self.cfg.video;
                let scrolled_past = matches!(
                    (obs.video_bottom_px, video.scroll_margin_px),
                    (Some(bottom), Some(margin)) if bottom < -margin
                );
                if scrolled_past {
                    Some((Phase::UrgencyWindow, Cause::Scroll))
                } else if video.time_on_page_secs.is_some_and(|limit| on_page >= limit) {
                    Some((Phase::UrgencyWindow, Cause::TimeOnPage))
                } else {
                    None
                }
            }
            Phase::UrgencyWindow => self
                .cfg
                .urgency
                .time_on_page_secs
                .is_some_and(|limit| on_page >= limit)
                .then_some((Phase::Offer, Cause::TimeOnPage)),
            _ => None,
        }
    }

    fn advance_delay(&self, phase: Phase) -> Option<Duration> {
        let ms = match phase {
            Phase::Loading => Some(self.cfg.loading_ms),
            Phase::Diagnosis => self.cfg.diagnosis.auto_advance_ms,
            Phase::Video => self.cfg.video.fallback_ms,
            Phase::UrgencyWindow => self.cfg.urgency.fallback_ms,
            Phase::Offer => None,
        }?;
        Some(Duration::from_millis(ms))
    }

    fn arm_advance(&self, phase: Phase) -> Option<Effect> {
        self.advance_delay(phase).map(|after| Effect::Schedule {
            token: TimerToken {
                scope: Scope::Phase(phase),
                kind: TimerKind::Advance,
            },
            after,
        })
    }

    fn scroll_follow_up(&self, phase: Phase, section: Section) -> Effect {
        Effect::Schedule {
            token: TimerToken {
                scope: Scope::Phase(phase),
                kind: TimerKind::ScrollFollowUp(section),
            },
            after: self.cfg.scroll_follow_up(),
        }
    }

    /// The one transition guard. No-op unless `target` is the direct
    /// successor of the current phase and has never been entered.
    fn advance_to(&mut self, target: Phase, cause: Cause, now: EpochMillis) -> Vec<Effect> {
        let current = self.state.phase;
        if self.state.has_entered(target) || current.next() != Some(target) {
            log::debug!("{cause:?} trigger for {target:?} ignored in {current:?}");
            return Vec::new();
        }
        let dwell = self.state.dwell(current, now);
        let dwell_ms = u64::try_from(dwell.as_millis()).unwrap_or(u64::MAX);

        self.state.enter(target, now);
        log::debug!("{current:?} -> {target:?} via {cause:?} after {dwell_ms}ms");

        let mut effects = vec![Effect::Disarm(Scope::Phase(current)), Effect::PlayCue];
        match target {
            Phase::Loading => {}
            Phase::Diagnosis => {
                effects.push(Effect::Track(AnalyticsEvent::RevelationViewed {
                    revelation: Revelation::Diagnosis,
                    dwell_ms,
                }));
                effects.push(self.scroll_follow_up(target, Section::Diagnosis));
            }
            Phase::Video => {
                effects.push(Effect::Track(AnalyticsEvent::VslEvent {
                    action: VslAction::Started,
                    dwell_ms,
                }));
                effects.push(self.scroll_follow_up(target, Section::Video));
                if !self.video_injected {
                    effects.push(Effect::Schedule {
                        token: TimerToken {
                            scope: Scope::Page,
                            kind: TimerKind::UnlockVideo,
                        },
                        after: self.cfg.video.unlock.delay_after(dwell),
                    });
                }
            }
            Phase::UrgencyWindow => {
                effects.push(Effect::Track(AnalyticsEvent::RevelationViewed {
                    revelation: Revelation::UrgencyWindow,
                    dwell_ms,
                }));
            }
            Phase::Offer => {
                self.state.offer_revealed = true;
                effects.push(Effect::ScrollTo(Section::Offer));
                effects.push(Effect::Track(AnalyticsEvent::RevelationViewed {
                    revelation: Revelation::Offer,
                    dwell_ms,
                }));
                effects.push(Effect::Track(AnalyticsEvent::OfferRevealed { dwell_ms }));
            }
        }
        effects.extend(self.arm_advance(target));
        effects
    }

    fn unlock_video(&mut self) -> Vec<Effect> {
        if self.video_injected {
            return Vec::new();
        }
        self.video_injected = true;
        self.state.video_unlocked = true;
        log::debug!("video unlocked");
        vec![Effect::InjectVideo]
    }
}
