use ventana_core::{Phase, QuizAnswers};
use yew::prelude::*;

use crate::components::countdown_bar::CountdownBar;
use crate::components::diagnosis::DiagnosisSection;
use crate::components::loading_panel::LoadingPanel;
use crate::components::offer::OfferSection;
use crate::components::stepper::Stepper;
use crate::components::sticky_footer::StickyFooter;
use crate::components::urgency_window::UrgencyWindowSection;
use crate::components::video::VideoSection;
use crate::driver::RevealSnapshot;

#[derive(Properties, PartialEq, Clone)]
pub struct ResultViewProps {
    pub answers: QuizAnswers,
    pub snapshot: RevealSnapshot,
    #[prop_or_default]
    pub loading_progress: u8,
    #[prop_or_default]
    pub on_continue: Callback<()>,
    #[prop_or_default]
    pub on_reveal: Callback<()>,
    #[prop_or_default]
    pub on_buy: Callback<()>,
    #[prop_or_default]
    pub on_reload: Callback<()>,
}

/// Result page body for one reveal frame. Sections accumulate: every phase
/// reached so far stays on the page.
#[function_component(ResultView)]
pub fn result_view(props: &ResultViewProps) -> Html {
    let snap = &props.snapshot;
    let gender = props.answers.gender();
    let shows = |phase: Phase| snap.phase >= phase;

    html! {
        <div class="result-container" id="main" role="main">
            <CountdownBar remaining_secs={snap.remaining_secs} spots_remaining={snap.spots_remaining} />
            <Stepper phase={snap.phase} />
            <div class="revelations-container">
                if snap.phase == Phase::Loading {
                    <LoadingPanel {gender} progress={props.loading_progress} />
                }
                if shows(Phase::Diagnosis) {
                    <DiagnosisSection
                        answers={props.answers.clone()}
                        current={snap.phase == Phase::Diagnosis}
                        awaiting_continue={snap.awaiting_continue}
                        on_continue={props.on_continue.clone()}
                    />
                }
                if shows(Phase::Video) {
                    <VideoSection
                        unlocked={snap.video_unlocked}
                        embed_error={snap.embed_error.clone().map(AttrValue::from)}
                        on_reload={props.on_reload.clone()}
                    />
                }
                if shows(Phase::UrgencyWindow) {
                    <UrgencyWindowSection
                        {gender}
                        can_reveal_offer={snap.can_reveal_offer}
                        on_reveal={props.on_reveal.clone()}
                    />
                }
                if snap.offer_revealed {
                    <OfferSection {gender} remaining_secs={snap.remaining_secs} on_buy={props.on_buy.clone()} />
                }
            </div>
            if snap.offer_revealed {
                <StickyFooter remaining_secs={snap.remaining_secs} />
            }
        </div>
    }
}

#[cfg(target_arch = "wasm32")]
pub use page::ResultPage;

#[cfg(target_arch = "wasm32")]
mod page {
    use gloo_timers::callback::Interval;
    use ventana_core::Phase;
    use yew::prelude::*;

    use super::ResultView;
    use crate::config;
    use crate::dom;
    use crate::driver::{RevealDriver, RevealSnapshot, SharedDriver};
    use crate::storage::BrowserStorage;

    const LOADING_TICK_MS: u32 = 100;
    const LOADING_STEP_PCT: u8 = 4;

    #[function_component(ResultPage)]
    pub fn result_page() -> Html {
        let answers = use_memo((), |()| BrowserStorage::store().quiz_answers());
        let snapshot = use_state_eq(|| RevealSnapshot::initial(&config::REVEAL_CONFIG));
        let loading_progress = use_state_eq(|| 0_u8);
        let driver = use_mut_ref(|| None::<SharedDriver>);
        let loading_ticker = use_mut_ref(|| None::<Interval>);

        {
            let driver = driver.clone();
            let snapshot = snapshot.setter();
            use_effect_with((), move |()| {
                let on_change = Callback::from(move |snap: RevealSnapshot| snapshot.set(snap));
                *driver.borrow_mut() = Some(RevealDriver::start(config::reveal(), on_change));
                move || {
                    if let Some(active) = driver.borrow_mut().take() {
                        active.borrow_mut().shutdown();
                    }
                }
            });
        }

        {
            let loading_ticker = loading_ticker.clone();
            let loading_progress = loading_progress.setter();
            use_effect_with((), move |()| {
                let mut progress = 0_u8;
                *loading_ticker.borrow_mut() = Some(Interval::new(LOADING_TICK_MS, move || {
                    progress = progress.saturating_add(LOADING_STEP_PCT).min(100);
                    loading_progress.set(progress);
                }));
                move || {
                    loading_ticker.borrow_mut().take();
                }
            });
        }

        {
            let loading_ticker = loading_ticker.clone();
            let done = *loading_progress >= 100 || snapshot.phase != Phase::Loading;
            use_effect_with(done, move |done| {
                if *done {
                    loading_ticker.borrow_mut().take();
                }
                || {}
            });
        }

        let with_driver = |action: fn(&SharedDriver)| {
            let driver = driver.clone();
            Callback::from(move |()| {
                let active: Option<SharedDriver> = driver.borrow().clone();
                if let Some(active) = active {
                    action(&active);
                }
            })
        };

        html! {
            <ResultView
                answers={(*answers).clone()}
                snapshot={(*snapshot).clone()}
                loading_progress={*loading_progress}
                on_continue={with_driver(RevealDriver::confirm_continue)}
                on_reveal={with_driver(RevealDriver::reveal_offer)}
                on_buy={with_driver(RevealDriver::buy)}
                on_reload={Callback::from(|()| dom::reload())}
            />
        }
    }
}
