use ventana_core::content::{diagnosis_copy, summary_rows, title};
use ventana_core::{QuizAnswers, Section};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DiagnosisProps {
    pub answers: QuizAnswers,
    /// Pulses while this is the newest revealed section.
    #[prop_or_default]
    pub current: bool,
    #[prop_or_default]
    pub awaiting_continue: bool,
    #[prop_or_default]
    pub on_continue: Callback<()>,
}

#[function_component(DiagnosisSection)]
pub fn diagnosis_section(props: &DiagnosisProps) -> Html {
    let gender = props.answers.gender();
    let on_continue = {
        let cb = props.on_continue.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section
            id={Section::Diagnosis.element_id()}
            class={classes!("revelation", "fade-in", props.current.then_some("diagnostic-pulse"))}
        >
            <div class="revelation-header">
                <div class="revelation-icon">{ "💔" }</div>
                <h2>{ title(gender) }</h2>
            </div>
            <div class="quiz-summary-box">
                <p class="summary-title">{ "📋 TU SITUACIÓN ESPECÍFICA" }</p>
                <div class="summary-grid">
                    { for summary_rows(&props.answers).into_iter().map(|(label, value)| html! {
                        <div><span>{ "✓" }</span>{ " " }<strong>{ format!("{label}:") }</strong>{ " " }{ value.to_string() }</div>
                    })}
                </div>
            </div>
            <div class="revelation-text">
                { for diagnosis_copy(&props.answers).split("\n\n").map(|para| html! {
                    <p class="pre-line">{ para.to_string() }</p>
                })}
            </div>
            if props.awaiting_continue {
                <div class="manual-reveal-container">
                    <button type="button" class="btn-continue" onclick={on_continue}>
                        { "CONTINUAR ▶" }
                    </button>
                </div>
            }
        </section>
    }
}
