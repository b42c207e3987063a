//! Deterministic result-page host driven by a virtual clock.
//!
//! [`SessionSim`] plays the part the browser plays in production: it owns the
//! timer queue, runs the one-second poll that feeds the countdown and the
//! time-on-page triggers, ticks the spots counter, and carries out every
//! [`Effect`] the controller returns. Reloads are simulated by building a new
//! session over the same [`MemoryStorage`].
use std::time::Duration;

use crate::analytics::{AnalyticsEvent, Page, RecordingSink, emit};
use crate::attribution::checkout_link;
use crate::countdown::{Countdown, CountdownTick, SessionExpiry};
use crate::embed::{MemoryEmbedHost, ensure_embed};
use crate::reveal::{
    Effect, EffectHost, Observation, Phase, PhaseController, PhaseState, RevealConfig, Scope,
    Section, TimerToken, apply_effects,
};
use crate::spots::SpotsCounter;
use crate::storage::{FunnelStore, MemoryStorage};
use crate::time::EpochMillis;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: EpochMillis,
    seq: u64,
    token: TimerToken,
}

#[derive(Debug)]
pub struct SessionSim {
    cfg: RevealConfig,
    store: FunnelStore<MemoryStorage>,
    sink: RecordingSink,
    embed: MemoryEmbedHost,
    controller: PhaseController,
    countdown: Countdown,
    spots: SpotsCounter,
    now: EpochMillis,
    timers: Vec<PendingTimer>,
    next_seq: u64,
    next_poll: EpochMillis,
    next_spots: EpochMillis,
    honour_disarm: bool,
    video_bottom_px: Option<f64>,
    cues: usize,
    scrolls: Vec<Section>,
    embed_errors: Vec<String>,
    expiry: Option<SessionExpiry>,
}

impl SessionSim {
    /// Load the result page at `now`.
    #[must_use]
    pub fn new(
        cfg: RevealConfig,
        storage: MemoryStorage,
        sink: RecordingSink,
        now: EpochMillis,
    ) -> Self {
        let store = FunnelStore::new(storage);
        let countdown = Countdown::resume(&store, now, cfg.countdown.clone());
        let spots = SpotsCounter::load(&store, &cfg.spots);
        let spots_interval = cfg.spots.interval();
        let mut sim = Self {
            controller: PhaseController::new(cfg.clone()),
            cfg,
            store,
            sink,
            embed: MemoryEmbedHost::new(),
            countdown,
            spots,
            now,
            timers: Vec::new(),
            next_seq: 0,
            next_poll: now.after(POLL_INTERVAL),
            next_spots: now.after(spots_interval),
            honour_disarm: true,
            video_bottom_px: None,
            cues: 0,
            scrolls: Vec::new(),
            embed_errors: Vec::new(),
            expiry: None,
        };
        emit(
            &sim.sink,
            &AnalyticsEvent::PageView {
                page: Page::Result,
                location: None,
            },
        );
        let effects = sim.controller.mount(now);
        sim.apply(effects);
        sim
    }

    /// Keep timers alive across `Disarm`, so only the controller's own scope
    /// check stands between a superseded timer and the state.
    #[must_use]
    pub fn with_leaky_timers(mut self) -> Self {
        self.honour_disarm = false;
        self
    }

    /// Swap the document stand-in, e.g. for one lacking the player placeholder.
    #[must_use]
    pub fn with_embed_host(mut self, embed: MemoryEmbedHost) -> Self {
        self.embed = embed;
        self
    }

    /// Load the page again over the same storage and analytics sink.
    #[must_use]
    pub fn reload(self) -> Self {
        let storage = self.store.storage().clone();
        Self::new(self.cfg, storage, self.sink, self.now)
    }

    /// Run the virtual clock forward, firing timers and polls in order.
    pub fn advance_by(&mut self, span: Duration) {
        let until = self.now.after(span);
        while !self.is_expired() {
            let Some(at) = self.next_event_at().filter(|at| *at <= until) else {
                break;
            };
            self.now = at;
            self.fire_due_timers();
            if self.next_poll <= at {
                self.next_poll = at.after(POLL_INTERVAL);
                self.poll();
            }
            if self.next_spots <= at {
                self.next_spots = at.after(self.cfg.spots.interval());
                if let Some(event) = self.spots.tick(&self.store) {
                    emit(&self.sink, &event);
                }
            }
        }
        if !self.is_expired() {
            self.now = until;
        }
    }

    /// Move the video section's bottom edge, as a scroll event would.
    pub fn scroll_video_to(&mut self, bottom_px: f64) {
        self.video_bottom_px = Some(bottom_px);
        if self.is_expired() {
            return;
        }
        let obs = self.observation();
        let effects = self.controller.observe(obs, self.now);
        self.apply(effects);
    }

    pub fn click_continue(&mut self) {
        if self.is_expired() {
            return;
        }
        let effects = self.controller.confirm_continue(self.now);
        self.apply(effects);
    }

    pub fn click_reveal(&mut self) {
        if self.is_expired() {
            return;
        }
        let effects = self.controller.reveal_offer(self.now);
        self.apply(effects);
    }

    /// Purchase intent. Returns the checkout link once the offer is visible.
    pub fn click_buy(&mut self) -> Option<String> {
        if self.is_expired() || !self.controller.state().offer_revealed() {
            return None;
        }
        emit(
            &self.sink,
            &AnalyticsEvent::CtaBuyClick {
                location: "result_buy_main",
            },
        );
        Some(checkout_link(
            &self.cfg.checkout.base_url,
            &self.store.attribution(),
        ))
    }

    #[must_use]
    pub const fn now(&self) -> EpochMillis {
        self.now
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.controller.phase()
    }

    #[must_use]
    pub const fn state(&self) -> &PhaseState {
        self.controller.state()
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs(self.now)
    }

    #[must_use]
    pub const fn spots_remaining(&self) -> u32 {
        self.spots.remaining()
    }

    #[must_use]
    pub const fn store(&self) -> &FunnelStore<MemoryStorage> {
        &self.store
    }

    #[must_use]
    pub const fn sink(&self) -> &RecordingSink {
        &self.sink
    }

    #[must_use]
    pub const fn embed(&self) -> &MemoryEmbedHost {
        &self.embed
    }

    #[must_use]
    pub const fn cue_count(&self) -> usize {
        self.cues
    }

    #[must_use]
    pub fn scrolls_to(&self, section: Section) -> usize {
        self.scrolls.iter().filter(|s| **s == section).count()
    }

    #[must_use]
    pub fn embed_errors(&self) -> &[String] {
        &self.embed_errors
    }

    #[must_use]
    pub const fn expiry(&self) -> Option<&SessionExpiry> {
        self.expiry.as_ref()
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.expiry.is_some()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn next_event_at(&self) -> Option<EpochMillis> {
        let next_timer = self.timers.iter().map(|t| t.due).min();
        [next_timer, Some(self.next_poll), Some(self.next_spots)]
            .into_iter()
            .flatten()
            .min()
    }

    fn fire_due_timers(&mut self) {
        loop {
            let due = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= self.now)
                .min_by_key(|(_, t)| (t.due, t.seq))
                .map(|(idx, _)| idx);
            let Some(idx) = due else {
                break;
            };
            let timer = self.timers.remove(idx);
            let effects = self.controller.on_timer(timer.token, self.now);
            self.apply(effects);
        }
    }

    fn poll(&mut self) {
        let obs = self.observation();
        let effects = self.controller.observe(obs, self.now);
        self.apply(effects);

        let phase = self.controller.phase();
        match self.countdown.tick(&self.store, self.now, phase) {
            CountdownTick::Expired(expiry) => {
                emit(&self.sink, &AnalyticsEvent::SessionExpired { phase });
                self.timers.clear();
                self.expiry = Some(expiry);
            }
            CountdownTick::Running { .. } | CountdownTick::Spent => {}
        }
    }

    fn observation(&self) -> Observation {
        Observation {
            video_bottom_px: self
                .video_bottom_px
                .filter(|_| self.controller.state().shows(Phase::Video)),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        apply_effects(self, effects);
    }
}

impl EffectHost for SessionSim {
    fn play_cue(&mut self) {
        self.cues += 1;
    }

    fn track(&mut self, event: &AnalyticsEvent) {
        emit(&self.sink, event);
    }

    fn scroll_to(&mut self, section: Section) {
        self.scrolls.push(section);
    }

    fn inject_video(&mut self) {
        if let Err(err) = ensure_embed(&self.embed, &self.cfg.embed) {
            log::error!("video embed failed: {err}");
            self.embed_errors.push(err.to_string());
        }
    }

    fn schedule(&mut self, token: TimerToken, after: Duration) {
        self.timers.push(PendingTimer {
            due: self.now.after(after),
            seq: self.next_seq,
            token,
        });
        self.next_seq += 1;
    }

    fn disarm(&mut self, scope: Scope) {
        if self.honour_disarm {
            self.timers.retain(|t| t.token.scope != scope);
        }
    }
}
