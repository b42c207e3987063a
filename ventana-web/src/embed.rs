//! Document-backed player embed.
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlScriptElement};

use ventana_core::{EmbedError, EmbedHost, EmbedSpec};

use crate::dom::{document, js_error_message};

type LoadErrorHook = Rc<dyn Fn(EmbedError)>;

/// Mounts the player into the live document. Script `error` events arrive
/// after [`ventana_core::ensure_embed`] has returned, so they are reported
/// through the optional hook instead.
#[derive(Clone, Default)]
pub struct DomEmbedHost {
    on_load_error: Option<LoadErrorHook>,
}

impl DomEmbedHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_load_error(mut self, hook: impl Fn(EmbedError) + 'static) -> Self {
        self.on_load_error = Some(Rc::new(hook));
        self
    }

    fn doc() -> Result<Document, EmbedError> {
        document().ok_or_else(|| EmbedError::Dom("document unavailable".to_string()))
    }
}

impl EmbedHost for DomEmbedHost {
    fn has_script(&self, src: &str) -> bool {
        let Ok(doc) = Self::doc() else {
            return false;
        };
        let Ok(scripts) = doc.query_selector_all("script[src]") else {
            return false;
        };
        (0..scripts.length())
            .filter_map(|idx| scripts.item(idx))
            .filter_map(|node| node.dyn_into::<HtmlScriptElement>().ok())
            .any(|script| script.src() == src)
    }

    fn append_script(&self, src: &str) -> Result<(), EmbedError> {
        let doc = Self::doc()?;
        let script = doc
            .create_element("script")
            .map_err(|err| EmbedError::Dom(js_error_message(&err)))?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| EmbedError::Dom("script element has unexpected type".to_string()))?;
        script.set_src(src);
        script.set_async(true);
        if let Some(hook) = self.on_load_error.clone() {
            let failed = src.to_string();
            let on_error = Closure::once_into_js(move || {
                log::error!("player script {failed} failed to load");
                hook(EmbedError::ScriptLoad(failed));
            });
            script.set_onerror(Some(on_error.unchecked_ref()));
        }
        let head = doc
            .head()
            .ok_or_else(|| EmbedError::Dom("document has no head".to_string()))?;
        head.append_child(&script)
            .map_err(|err| EmbedError::ScriptLoad(format!("{src}: {}", js_error_message(&err))))?;
        Ok(())
    }

    fn has_player(&self, spec: &EmbedSpec) -> bool {
        Self::doc()
            .ok()
            .and_then(|doc| doc.get_element_by_id(&spec.player_id))
            .is_some()
    }

    fn mount_player(&self, spec: &EmbedSpec) -> Result<(), EmbedError> {
        let container = Self::doc()?
            .query_selector(&spec.container_selector)
            .map_err(|err| EmbedError::Dom(js_error_message(&err)))?
            .ok_or_else(|| EmbedError::MissingContainer(spec.container_selector.clone()))?;
        container.set_inner_html(&spec.player_markup());
        Ok(())
    }
}
