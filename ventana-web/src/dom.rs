use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlAudioElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Storage, Window,
};

use ventana_core::EpochMillis;

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Wall-clock time from `Date.now()`.
#[must_use]
pub fn now() -> EpochMillis {
    let millis = js_sys::Date::now();
    if millis.is_finite() && millis > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        EpochMillis::from_millis(millis as u64)
    } else {
        EpochMillis::from_millis(0)
    }
}

/// Delay in the form `setTimeout` accepts. Browsers treat anything above
/// `i32::MAX` as zero, so longer delays are held at that ceiling.
#[must_use]
pub fn timeout_millis(delay: Duration) -> u32 {
    const CEILING: u32 = i32::MAX.unsigned_abs();
    u32::try_from(delay.as_millis()).map_or(CEILING, |ms| ms.min(CEILING))
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Current `location.search`, including the leading `?` when present.
#[must_use]
pub fn location_search() -> String {
    window()
        .and_then(|win| win.location().search().ok())
        .unwrap_or_default()
}

#[must_use]
pub fn location_href() -> Option<String> {
    window().and_then(|win| win.location().href().ok())
}

/// Replace the current history entry's query string without navigating.
pub fn replace_query(query: &str) {
    let Some(win) = window() else {
        return;
    };
    let path = win.location().pathname().unwrap_or_default();
    let target = format!("{path}{query}");
    match win.history() {
        Ok(history) => {
            if let Err(err) =
                history.replace_state_with_url(&JsValue::NULL, "", Some(target.as_str()))
            {
                log::warn!("history replace failed: {}", js_error_message(&err));
            }
        }
        Err(err) => log::warn!("history unavailable: {}", js_error_message(&err)),
    }
}

/// Full page navigation, dropping all in-memory state.
pub fn navigate(href: &str) {
    if let Some(win) = window()
        && let Err(err) = win.location().set_href(href)
    {
        log::error!("navigation to {href} failed: {}", js_error_message(&err));
    }
}

pub fn reload() {
    if let Some(win) = window()
        && let Err(err) = win.location().reload()
    {
        log::error!("reload failed: {}", js_error_message(&err));
    }
}

pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

/// Open `url` in a new browsing context.
pub fn open_new_tab(url: &str) {
    let Some(win) = window() else {
        return;
    };
    match win.open_with_url_and_target(url, "_blank") {
        Ok(Some(_)) => {}
        Ok(None) => log::warn!("popup blocked for {url}"),
        Err(err) => log::error!("could not open {url}: {}", js_error_message(&err)),
    }
}

#[must_use]
pub fn element_by_id(id: &str) -> Option<Element> {
    document().and_then(|doc| doc.get_element_by_id(id))
}

/// Smoothly scroll the element with `id` to the middle of the viewport.
pub fn scroll_into_view(id: &str) {
    let Some(element) = element_by_id(id) else {
        log::debug!("scroll target #{id} not rendered");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Bottom edge of the element with `id`, relative to the viewport top.
#[must_use]
pub fn element_bottom(id: &str) -> Option<f64> {
    element_by_id(id).map(|element| element.get_bounding_client_rect().bottom())
}

/// Fraction (0..=1) of the element with `id` inside the viewport.
#[must_use]
pub fn visible_fraction(id: &str) -> Option<f64> {
    let element = element_by_id(id)?;
    let viewport = window()?.inner_height().ok()?.as_f64()?;
    let rect = element.get_bounding_client_rect();
    let height = rect.height();
    if height <= 0.0 {
        return Some(0.0);
    }
    let visible = rect.bottom().min(viewport) - rect.top().max(0.0);
    Some((visible / height).clamp(0.0, 1.0))
}

/// Play the short audio cue that marks a phase change. Autoplay refusals
/// are logged and ignored.
pub fn play_cue(src: &str) {
    match HtmlAudioElement::new_with_src(src) {
        Ok(audio) => {
            if let Err(err) = audio.play() {
                log::debug!("audio cue refused: {}", js_error_message(&err));
            }
        }
        Err(err) => log::debug!("audio cue unavailable: {}", js_error_message(&err)),
    }
}

/// Window `scroll` listener that detaches itself when dropped.
pub struct ScrollListener {
    closure: Closure<dyn FnMut(Event)>,
}

impl ScrollListener {
    /// Attach `on_scroll` to the window.
    ///
    /// # Errors
    /// Returns an error if there is no window or the listener cannot be added.
    pub fn attach(on_scroll: impl FnMut(Event) + 'static) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(on_scroll);
        window()
            .ok_or_else(|| JsValue::from_str("window unavailable"))?
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        Ok(Self { closure })
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback(
                "scroll",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_delays_pass_through() {
        assert_eq!(timeout_millis(Duration::ZERO), 0);
        assert_eq!(timeout_millis(Duration::from_millis(1_500)), 1_500);
    }

    #[test]
    fn long_delays_stop_at_the_timer_ceiling() {
        let ceiling = 2_147_483_647;
        assert_eq!(timeout_millis(Duration::from_millis(u64::from(u32::MAX))), ceiling);
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), ceiling);
        assert_eq!(timeout_millis(Duration::from_millis(2_147_483_647)), ceiling);
    }
}
