use ventana_core::QuizProgress;
use ventana_core::content::completion_badge;
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct QuizViewProps {
    pub progress: QuizProgress,
    /// Receives the chosen option's stored value.
    pub on_answer: Callback<String>,
    pub on_finish: Callback<()>,
}

/// One question at a time, then the completion card.
#[function_component(QuizView)]
pub fn quiz_view(props: &QuizViewProps) -> Html {
    let progress = &props.progress;
    let Some(question) = progress.current() else {
        let badge = completion_badge(progress.answers().gender());
        let on_finish = {
            let cb = props.on_finish.clone();
            Callback::from(move |_| cb.emit(()))
        };
        return html! {
            <section class="chat-container chat-complete" id="main" role="main">
                <div class="completion-badge">
                    <h2>{ badge.title }</h2>
                    <p>{ badge.subtitle }</p>
                </div>
                <button type="button" class="cta-button" onclick={on_finish}>
                    { "VER MI DIAGNÓSTICO" }
                </button>
            </section>
        };
    };

    html! {
        <section class="chat-container" id="main" role="main">
            <p class="chat-progress">
                { format!("Pregunta {} de {}", progress.answered() + 1, progress.total()) }
            </p>
            <div class="chat-bubble" aria-live="polite">
                <p>{ question.prompt }</p>
            </div>
            <div class="chat-options">
                { for progress.current_options().into_iter().map(|option| {
                    let cb = props.on_answer.clone();
                    let value = option.value.clone();
                    html! {
                        <button
                            type="button"
                            class="chat-option"
                            data-value={option.value}
                            onclick={Callback::from(move |_| cb.emit(value.clone()))}
                        >
                            { option.label }
                        </button>
                    }
                })}
            </div>
        </section>
    }
}

#[cfg(target_arch = "wasm32")]
pub use page::QuizPage;

#[cfg(target_arch = "wasm32")]
mod page {
    use ventana_core::{AnalyticsEvent, Page, QuizProgress};
    use yew::prelude::*;
    use yew_router::prelude::*;

    use super::QuizView;
    use crate::analytics::track;
    use crate::dom;
    use crate::router::Route;
    use crate::storage::BrowserStorage;

    #[function_component(QuizPage)]
    pub fn quiz_page() -> Html {
        let progress = use_state_eq(QuizProgress::new);
        let navigator = use_navigator();

        use_effect_with((), |()| {
            track(&AnalyticsEvent::PageView {
                page: Page::Chat,
                location: dom::location_href(),
            });
            track(&AnalyticsEvent::ChatStarted);
            || {}
        });

        let on_answer = {
            let progress = progress.clone();
            Callback::from(move |value: String| {
                let mut next = (*progress).clone();
                match next.answer(&value) {
                    Ok(event) => {
                        track(&event);
                        progress.set(next);
                    }
                    Err(err) => log::warn!("answer ignored: {err}"),
                }
            })
        };

        let on_finish = {
            let progress = progress.clone();
            Callback::from(move |()| {
                track(&AnalyticsEvent::chat_cta());
                match progress.complete(&BrowserStorage::store()) {
                    Ok(event) => {
                        track(&event);
                        if let Some(nav) = navigator.as_ref() {
                            nav.push(&Route::Result);
                        }
                    }
                    Err(err) => log::warn!("cannot finish quiz: {err}"),
                }
            })
        };

        html! { <QuizView progress={(*progress).clone()} {on_answer} {on_finish} /> }
    }
}
