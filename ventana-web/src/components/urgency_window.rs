use ventana_core::content::{WindowStage, phase_description, urgency_window_copy};
use ventana_core::{Gender, Section};
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct UrgencyWindowProps {
    pub gender: Gender,
    #[prop_or_default]
    pub can_reveal_offer: bool,
    #[prop_or_default]
    pub on_reveal: Callback<()>,
}

#[function_component(UrgencyWindowSection)]
pub fn urgency_window_section(props: &UrgencyWindowProps) -> Html {
    let on_reveal = {
        let cb = props.on_reveal.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <>
            <section id={Section::UrgencyWindow.element_id()} class="revelation fade-in ventana-box-custom">
                <div class="ventana-header-custom">
                    <span>{ "⚡" }</span>
                    <h2>{ "LA VENTANA DE 72 HORAS" }</h2>
                </div>
                <p class="ventana-intro pre-line">{ urgency_window_copy(props.gender) }</p>
                <div class="fases-list">
                    { for WindowStage::ALL.iter().map(|stage| html! {
                        <div class="fase-item-custom">
                            <strong>{ format!("FASE {} ({})", stage.number(), stage.label()) }</strong>
                            <p>{ phase_description(props.gender, *stage) }</p>
                        </div>
                    })}
                </div>
            </section>
            if props.can_reveal_offer {
                <div class="manual-reveal-container">
                    <button type="button" class="btn-reveal-offer" onclick={on_reveal}>
                        { "🎯 QUIERO VER LA SOLUCIÓN AHORA" }
                    </button>
                    <p>{ "👆 Haz clic para acceder a la oferta exclusiva" }</p>
                </div>
            }
        </>
    }
}
