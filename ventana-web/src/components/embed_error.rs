use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct EmbedErrorProps {
    pub message: AttrValue,
    pub on_reload: Callback<()>,
}

/// Inline notice for a player that failed to load, with a manual reload.
#[function_component(EmbedErrorNotice)]
pub fn embed_error_notice(props: &EmbedErrorProps) -> Html {
    let on_click = {
        let cb = props.on_reload.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="embed-error" role="alert" title={props.message.clone()}>
            <p>{ "No pudimos cargar el vídeo." }</p>
            <button type="button" class="btn-reload" onclick={on_click}>
                { "🔄 Recargar página" }
            </button>
        </div>
    }
}
