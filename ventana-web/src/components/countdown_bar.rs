use ventana_core::format_clock;
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct CountdownBarProps {
    pub remaining_secs: u64,
    pub spots_remaining: u32,
}

/// Header urgency bar shown for the whole result session.
#[function_component(CountdownBar)]
pub fn countdown_bar(props: &CountdownBarProps) -> Html {
    let formatted = format_clock(props.remaining_secs);
    html! {
        <div class="result-header">
            <h1 class="result-title">{ "Tu Plan Personalizado Está Listo" }</h1>
            <div class="urgency-bar" role="timer" aria-live="polite">
                <span class="urgency-icon">{ "⚠️" }</span>
                <span class="urgency-text">{ format!("Tu análisis expira en: {formatted}") }</span>
            </div>
            <p class="urgency-note">
                { "Por seguridad, tu diagnóstico personalizado estará disponible solo por 47 minutos." }
            </p>
            <p class="spots-left">{ format!("🔥 Quedan {} cupos con este precio", props.spots_remaining) }</p>
        </div>
    }
}
