use yew::prelude::*;

/// Element id of the CTA block watched for the scroll-depth event.
pub const CTA_SECTION_ID: &str = "cta-section";

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct LandingViewProps {
    pub user_count: u32,
    pub on_start: Callback<()>,
}

#[function_component(LandingView)]
pub fn landing_view(props: &LandingViewProps) -> Html {
    let on_start = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="landing-container">
            <div class="content-wrapper">
                <header class="landing-header">
                    <div class="avatar-container">
                        <div class="avatar-placeholder">{ "RA" }</div>
                        <p class="avatar-label">{ "Ricardo Abreu" }</p>
                    </div>
                </header>
                <main class="landing-main" id="main" role="main">
                    <h1 class="headline">
                        { "Descubre la Verdad Sobre Tu Ex: Análisis Psicológico en Tiempo Real por el Especialista" }
                    </h1>
                    <p class="subheadline">
                        { "En minutos, revela el plan personalizado que ya ayudó a +12.847 personas a reconquistar el amor perdido. ¡No pierdas la Ventana de 72 Horas!" }
                    </p>
                    <div class="user-counter" aria-live="polite">
                        <div class="counter-pulse"></div>
                        <span class="counter-text">
                            <span class="counter-number">{ props.user_count.to_string() }</span>
                            { " usuarios siendo analizados ahora" }
                        </span>
                    </div>
                    <div class="social-proof">
                        <span>{ "✓ Basado en psicología conductual comprobada" }</span>
                    </div>
                    <div class="cta-section" id={CTA_SECTION_ID}>
                        <button type="button" class="cta-button" onclick={on_start}>
                            { "INICIAR ANÁLISIS AHORA" }
                        </button>
                    </div>
                </main>
                <footer class="landing-footer">
                    <p class="disclaimer">
                        { "Sistema desarrollado con psicología conductual y neurociencia aplicada" }
                    </p>
                </footer>
            </div>
        </div>
    }
}

#[cfg(target_arch = "wasm32")]
pub use page::LandingPage;

#[cfg(target_arch = "wasm32")]
mod page {
    use gloo_timers::callback::Interval;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ventana_core::{AnalyticsEvent, Page, VisitorCounter, capture_entry_attribution};
    use yew::prelude::*;
    use yew_router::prelude::*;

    use super::{CTA_SECTION_ID, LandingView};
    use crate::analytics::track;
    use crate::config::LANDING_CONFIG;
    use crate::dom;
    use crate::router::Route;
    use crate::storage::BrowserStorage;

    /// Entry page: captures attribution, runs the visitor counter and
    /// reports the CTA scroll depth once.
    #[function_component(LandingPage)]
    pub fn landing_page() -> Html {
        let user_count = use_state_eq(|| {
            VisitorCounter::load(&BrowserStorage::store(), &LANDING_CONFIG).count()
        });
        let navigator = use_navigator();

        {
            let user_count = user_count.clone();
            use_effect_with((), move |()| {
                let store = BrowserStorage::store();
                capture_entry_attribution(&store, &dom::location_search());
                track(&AnalyticsEvent::PageView {
                    page: Page::Landing,
                    location: dom::location_href(),
                });

                let mut counter = VisitorCounter::load(&store, &LANDING_CONFIG);
                let mut rng = ChaCha8Rng::seed_from_u64(dom::now().as_millis());
                let every = dom::timeout_millis(LANDING_CONFIG.bump_interval());
                let bumper = Interval::new(every, move || {
                    user_count.set(counter.bump(&mut rng, &store));
                });

                let mut reported = false;
                let threshold = f64::from(LANDING_CONFIG.scroll_depth_pct) / 100.0;
                let depth = LANDING_CONFIG.scroll_depth_pct;
                let listener = dom::ScrollListener::attach(move |_| {
                    if reported {
                        return;
                    }
                    if dom::visible_fraction(CTA_SECTION_ID).is_some_and(|f| f >= threshold) {
                        reported = true;
                        track(&AnalyticsEvent::ScrollDepth {
                            depth_pct: depth,
                            page: Page::Landing,
                        });
                    }
                })
                .map_err(|err| log::warn!("scroll depth disabled: {}", dom::js_error_message(&err)))
                .ok();

                move || {
                    drop(bumper);
                    drop(listener);
                }
            });
        }

        let on_start = Callback::from(move |()| {
            track(&AnalyticsEvent::landing_cta());
            if let Some(nav) = navigator.as_ref() {
                nav.push(&Route::Chat);
            }
        });

        html! { <LandingView user_count={*user_count} {on_start} /> }
    }
}
