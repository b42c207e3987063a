//! Google Analytics (`gtag.js`) egress.
use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use ventana_core::{AnalyticsError, AnalyticsEvent, AnalyticsSink, EventParams, emit};

use crate::dom::{js_error_message, window};

/// Sends events through the page's global `gtag` function. The function is
/// resolved per event; until the tag script has loaded every send reports
/// [`AnalyticsError::NotReady`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GtagSink;

impl GtagSink {
    fn gtag() -> Option<Function> {
        let win = window()?;
        Reflect::get(&win, &JsValue::from_str("gtag"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl AnalyticsSink for GtagSink {
    fn send(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError> {
        let gtag = Self::gtag().ok_or(AnalyticsError::NotReady)?;
        let params = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| AnalyticsError::Rejected {
                event: name.to_string(),
                reason: err.to_string(),
            })?;
        gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(name),
            &params,
        )
        .map(|_| ())
        .map_err(|err| AnalyticsError::Rejected {
            event: name.to_string(),
            reason: js_error_message(&err),
        })
    }
}

/// Fire-and-forget through [`GtagSink`].
pub fn track(event: &AnalyticsEvent) {
    emit(&GtagSink, event);
}
