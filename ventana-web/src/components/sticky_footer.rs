use ventana_core::format_clock;
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct StickyFooterProps {
    pub remaining_secs: u64,
}

#[function_component(StickyFooter)]
pub fn sticky_footer(props: &StickyFooterProps) -> Html {
    html! {
        <div class="sticky-footer-urgency fade-in-up" role="timer">
            { format!("⏰ {}", format_clock(props.remaining_secs)) }
        </div>
    }
}
