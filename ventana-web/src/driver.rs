//! Browser host for the reveal controller.
//!
//! [`RevealDriver`] owns every timer, interval and listener the result page
//! needs. Timer handles are grouped by [`Scope`]; a `Disarm` effect drops the
//! group, which cancels the underlying `setTimeout`s. Callbacks hold only a
//! weak reference and hop through `spawn_local` before touching the driver,
//! so a handler may freely drop the very handle that invoked it.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use yew::Callback;

use ventana_core::{
    AnalyticsEvent, Countdown, CountdownTick, Effect, EffectHost, EmbedError, EpochMillis,
    FunnelStore, Observation, Page, Phase, PhaseController, RevealConfig, Scope, Section,
    SessionExpiry, SpotsCounter, TimerToken, apply_effects, checkout_link, ensure_embed,
    restored_query,
};

use crate::analytics::track;
use crate::dom;
use crate::embed::DomEmbedHost;
use crate::paths;
use crate::storage::BrowserStorage;

const POLL_MS: u32 = 1_000;

/// What the result view needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSnapshot {
    pub phase: Phase,
    pub video_unlocked: bool,
    pub offer_revealed: bool,
    pub awaiting_continue: bool,
    pub can_reveal_offer: bool,
    pub remaining_secs: u64,
    pub spots_remaining: u32,
    pub embed_error: Option<String>,
}

impl RevealSnapshot {
    /// Frame shown before the driver has started.
    #[must_use]
    pub fn initial(cfg: &RevealConfig) -> Self {
        Self {
            phase: Phase::Loading,
            video_unlocked: false,
            offer_revealed: false,
            awaiting_continue: false,
            can_reveal_offer: false,
            remaining_secs: cfg.countdown.deadline_secs,
            spots_remaining: cfg.spots.initial,
            embed_error: None,
        }
    }
}

pub type SharedDriver = Rc<RefCell<RevealDriver>>;

pub struct RevealDriver {
    controller: PhaseController,
    store: FunnelStore<BrowserStorage>,
    embed: DomEmbedHost,
    countdown: Countdown,
    spots: SpotsCounter,
    timers: HashMap<Scope, Vec<Timeout>>,
    poll: Option<Interval>,
    spots_ticker: Option<Interval>,
    scroll: Option<dom::ScrollListener>,
    embed_error: Option<String>,
    expired: bool,
    cue_src: String,
    on_change: Callback<RevealSnapshot>,
}

/// Run `f` against the driver on a later microtask, if it is still alive.
fn defer(weak: Weak<RefCell<RevealDriver>>, f: impl FnOnce(&SharedDriver) + 'static) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(this) = weak.upgrade() {
            f(&this);
        }
    });
}

impl RevealDriver {
    /// Load the result page: restore attribution on the URL, report the page
    /// view, resume the session clock and mount the controller.
    pub fn start(cfg: RevealConfig, on_change: Callback<RevealSnapshot>) -> SharedDriver {
        let store = BrowserStorage::store();
        if let Some(query) = restored_query(&store, &dom::location_search()) {
            log::debug!("restoring attribution on result URL");
            dom::replace_query(&query);
        }
        track(&AnalyticsEvent::PageView {
            page: Page::Result,
            location: dom::location_href(),
        });

        let now = dom::now();
        let countdown = Countdown::resume(&store, now, cfg.countdown.clone());
        let spots = SpotsCounter::load(&store, &cfg.spots);
        let spots_every = cfg.spots.interval();
        let this = Rc::new(RefCell::new(Self {
            controller: PhaseController::new(cfg),
            store,
            embed: DomEmbedHost::new(),
            countdown,
            spots,
            timers: HashMap::new(),
            poll: None,
            spots_ticker: None,
            scroll: None,
            embed_error: None,
            expired: false,
            cue_src: paths::cue_src(),
            on_change,
        }));
        Self::wire(&this, spots_every);
        Self::dispatch(&this, |controller, now| controller.mount(now));
        this
    }

    fn wire(this: &SharedDriver, spots_every: Duration) {
        let weak = Rc::downgrade(this);
        let on_load_error = weak.clone();
        let embed = DomEmbedHost::new().on_load_error(move |err: EmbedError| {
            if let Some(this) = on_load_error.upgrade() {
                this.borrow_mut().embed_error = Some(err.to_string());
                Self::publish(&this);
            }
        });

        let poll_weak = weak.clone();
        let poll = Interval::new(POLL_MS, move || {
            defer(poll_weak.clone(), Self::poll);
        });

        let spots_weak = weak.clone();
        let spots_ticker = Interval::new(dom::timeout_millis(spots_every), move || {
            defer(spots_weak.clone(), Self::tick_spots);
        });

        let scroll = dom::ScrollListener::attach(move |_| {
            if let Some(this) = weak.upgrade() {
                Self::observe(&this);
            }
        })
        .map_err(|err| log::warn!("scroll triggers disabled: {}", dom::js_error_message(&err)))
        .ok();

        let mut driver = this.borrow_mut();
        driver.embed = embed;
        driver.poll = Some(poll);
        driver.spots_ticker = Some(spots_ticker);
        driver.scroll = scroll;
    }

    #[must_use]
    pub fn snapshot(&self, now: EpochMillis) -> RevealSnapshot {
        let state = self.controller.state();
        RevealSnapshot {
            phase: state.phase(),
            video_unlocked: state.video_unlocked(),
            offer_revealed: state.offer_revealed(),
            awaiting_continue: self.controller.awaiting_continue(),
            can_reveal_offer: self.controller.can_reveal_offer(),
            remaining_secs: self.countdown.remaining_secs(now),
            spots_remaining: self.spots.remaining(),
            embed_error: self.embed_error.clone(),
        }
    }

    pub fn confirm_continue(this: &SharedDriver) {
        Self::dispatch(this, PhaseController::confirm_continue);
    }

    pub fn reveal_offer(this: &SharedDriver) {
        Self::dispatch(this, PhaseController::reveal_offer);
    }

    /// Purchase intent: report it and open the checkout with attribution.
    pub fn buy(this: &SharedDriver) {
        let link = {
            let driver = this.borrow();
            if driver.expired || !driver.controller.state().offer_revealed() {
                return;
            }
            checkout_link(
                &driver.controller.config().checkout.base_url,
                &driver.store.attribution(),
            )
        };
        track(&AnalyticsEvent::CtaBuyClick {
            location: "result_buy_main",
        });
        dom::open_new_tab(&link);
    }

    /// Live timer handles registered for `scope`.
    #[must_use]
    pub fn armed(&self, scope: Scope) -> usize {
        self.timers.get(&scope).map_or(0, Vec::len)
    }

    /// Cancel everything the page registered.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.poll = None;
        self.spots_ticker = None;
        self.scroll = None;
    }

    fn dispatch(
        this: &SharedDriver,
        step: impl FnOnce(&mut PhaseController, EpochMillis) -> Vec<Effect>,
    ) {
        let effects = {
            let mut driver = this.borrow_mut();
            if driver.expired {
                return;
            }
            step(&mut driver.controller, dom::now())
        };
        Self::apply(this, effects);
        Self::publish(this);
    }

    fn on_timer(this: &SharedDriver, token: TimerToken) {
        Self::dispatch(this, |controller, now| controller.on_timer(token, now));
    }

    fn observe(this: &SharedDriver) {
        let obs = {
            let driver = this.borrow();
            if driver.controller.state().shows(Phase::Video) {
                Observation {
                    video_bottom_px: dom::element_bottom(Section::Video.element_id()),
                }
            } else {
                Observation::default()
            }
        };
        Self::dispatch(this, |controller, now| controller.observe(obs, now));
    }

    fn poll(this: &SharedDriver) {
        Self::observe(this);
        let expiry = {
            let mut guard = this.borrow_mut();
            let driver = &mut *guard;
            if driver.expired {
                return;
            }
            let phase = driver.controller.phase();
            match driver.countdown.tick(&driver.store, dom::now(), phase) {
                CountdownTick::Expired(expiry) => {
                    driver.expired = true;
                    driver.shutdown();
                    Some(expiry)
                }
                CountdownTick::Running { .. } | CountdownTick::Spent => None,
            }
        };
        match expiry {
            Some(expiry) => Self::expire(&expiry),
            None => Self::publish(this),
        }
    }

    fn expire(expiry: &SessionExpiry) {
        track(&AnalyticsEvent::SessionExpired {
            phase: expiry.phase,
        });
        dom::alert(expiry.message);
        dom::navigate(&paths::asset_path(&expiry.redirect_to));
    }

    fn tick_spots(this: &SharedDriver) {
        let event = {
            let mut guard = this.borrow_mut();
            let driver = &mut *guard;
            if driver.expired {
                return;
            }
            driver.spots.tick(&driver.store)
        };
        if let Some(event) = event {
            track(&event);
        }
        Self::publish(this);
    }

    fn apply(this: &SharedDriver, effects: Vec<Effect>) {
        apply_effects(&mut PageHost { this }, effects);
    }

    fn publish(this: &SharedDriver) {
        let (snapshot, on_change) = {
            let driver = this.borrow();
            (driver.snapshot(dom::now()), driver.on_change.clone())
        };
        on_change.emit(snapshot);
    }
}

/// The live page as an [`EffectHost`]. Each call borrows the driver only for
/// its own duration.
struct PageHost<'a> {
    this: &'a SharedDriver,
}

impl EffectHost for PageHost<'_> {
    fn play_cue(&mut self) {
        dom::play_cue(&self.this.borrow().cue_src);
    }

    fn track(&mut self, event: &AnalyticsEvent) {
        track(event);
    }

    fn scroll_to(&mut self, section: Section) {
        // The section renders on the next frame.
        let _ = Timeout::new(0, move || dom::scroll_into_view(section.element_id())).forget();
    }

    fn inject_video(&mut self) {
        let (embed, spec) = {
            let driver = self.this.borrow();
            (driver.embed.clone(), driver.controller.config().embed.clone())
        };
        if let Err(err) = ensure_embed(&embed, &spec) {
            log::error!("video embed failed: {err}");
            self.this.borrow_mut().embed_error = Some(err.to_string());
        }
    }

    fn schedule(&mut self, token: TimerToken, after: Duration) {
        let weak = Rc::downgrade(self.this);
        let handle = Timeout::new(dom::timeout_millis(after), move || {
            defer(weak, move |this| RevealDriver::on_timer(this, token));
        });
        self.this
            .borrow_mut()
            .timers
            .entry(token.scope)
            .or_default()
            .push(handle);
    }

    fn disarm(&mut self, scope: Scope) {
        if let Some(handles) = self.this.borrow_mut().timers.remove(&scope) {
            log::debug!("disarmed {} timer(s) for {scope:?}", handles.len());
        }
    }
}

impl Drop for RevealDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
