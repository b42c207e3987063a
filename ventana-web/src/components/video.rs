use ventana_core::Section;
use yew::prelude::*;

use super::embed_error::EmbedErrorNotice;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct VideoProps {
    #[prop_or_default]
    pub unlocked: bool,
    #[prop_or_default]
    pub embed_error: Option<AttrValue>,
    #[prop_or_default]
    pub on_reload: Callback<()>,
}

/// Video section. The player is injected into `.vsl-placeholder` outside of
/// the virtual DOM, so the placeholder never gets rendered children.
#[function_component(VideoSection)]
pub fn video_section(props: &VideoProps) -> Html {
    html! {
        <section id={Section::Video.element_id()} class="revelation fade-in vsl-revelation">
            <div class="revelation-header">
                <div class="revelation-icon">{ "🎥" }</div>
                <h2>{ "Cómo Reactivar Los Interruptores Emocionales En 72 Horas" }</h2>
            </div>
            <div class="vsl-container">
                <div class="vsl-placeholder"></div>
            </div>
            if !props.unlocked {
                <p class="vsl-status" aria-live="polite">{ "Preparando tu vídeo..." }</p>
            }
            if let Some(message) = props.embed_error.clone() {
                <EmbedErrorNotice {message} on_reload={props.on_reload.clone()} />
            }
        </section>
    }
}
