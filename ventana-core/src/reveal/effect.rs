//! Side effects requested by the controller and carried out by the host.
use std::time::Duration;

use crate::analytics::AnalyticsEvent;
use crate::reveal::phase::{Phase, Section};

/// Lifetime a timer or listener is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Page,
    Phase(Phase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Elapsed-time trigger for leaving the scope's phase.
    Advance,
    ScrollFollowUp(Section),
    UnlockVideo,
}

/// Handed back to [`super::PhaseController::on_timer`] when a scheduled timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub scope: Scope,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PlayCue,
    Track(AnalyticsEvent),
    ScrollTo(Section),
    /// Ensure the video player is present in the video section.
    InjectVideo,
    Schedule {
        token: TimerToken,
        after: Duration,
    },
    /// Cancel every timer and listener registered for the scope.
    Disarm(Scope),
}

impl Effect {
    #[must_use]
    pub fn tracked(&self) -> Option<&AnalyticsEvent> {
        match self {
            Self::Track(event) => Some(event),
            _ => None,
        }
    }
}

/// Carries out [`Effect`]s against a page, real or simulated.
pub trait EffectHost {
    fn play_cue(&mut self);
    fn track(&mut self, event: &AnalyticsEvent);
    fn scroll_to(&mut self, section: Section);
    /// Ensure the player is mounted; failures are the host's to report.
    fn inject_video(&mut self);
    fn schedule(&mut self, token: TimerToken, after: Duration);
    fn disarm(&mut self, scope: Scope);
}

/// Hand each effect to `host`, in order.
pub fn apply_effects<H: EffectHost + ?Sized>(host: &mut H, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::PlayCue => host.play_cue(),
            Effect::Track(event) => host.track(&event),
            Effect::ScrollTo(section) => host.scroll_to(section),
            Effect::InjectVideo => host.inject_video(),
            Effect::Schedule { token, after } => host.schedule(token, after),
            Effect::Disarm(scope) => host.disarm(scope),
        }
    }
}
