//! Analytics event catalogue and the fire-and-forget egress seam.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::reveal::Phase;

pub type EventParams = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Landing,
    Chat,
    Result,
}

impl Page {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "Landing Page",
            Self::Chat => "Chat Analysis",
            Self::Result => "Result Page",
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Chat => "/chat",
            Self::Result => "/resultado",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Chat => "chat",
            Self::Result => "resultado",
        }
    }
}

/// Revealed sections that report a `revelation_viewed` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Revelation {
    Diagnosis,
    UrgencyWindow,
    Offer,
}

impl Revelation {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Diagnosis => "Diagnóstico",
            Self::UrgencyWindow => "Ventana 72 Horas",
            Self::Offer => "Oferta Revelada",
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Diagnosis => 1,
            Self::UrgencyWindow => 2,
            Self::Offer => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VslAction {
    Started,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    PageView {
        page: Page,
        location: Option<String>,
    },
    CtaClick {
        button_name: &'static str,
        location: &'static str,
        page: Page,
    },
    ScrollDepth {
        depth_pct: u8,
        page: Page,
    },
    ChatStarted,
    QuestionAnswered {
        question_id: u32,
        question_text: String,
        answer: String,
    },
    ChatCompleted,
    RevelationViewed {
        revelation: Revelation,
        dwell_ms: u64,
    },
    VslEvent {
        action: VslAction,
        dwell_ms: u64,
    },
    OfferRevealed {
        dwell_ms: u64,
    },
    CtaBuyClick {
        location: &'static str,
    },
    SpotsAlert {
        remaining: u32,
    },
    SessionExpired {
        phase: Phase,
    },
}

impl AnalyticsEvent {
    #[must_use]
    /// Primary landing call to action that opens the quiz.
    #[must_use]
    pub const fn landing_cta() -> Self {
        Self::CtaClick {
            button_name: "Iniciar Análisis",
            location: "landing_primary",
            page: Page::Landing,
        }
    }

    /// Button shown once the quiz is complete, leading to the result page.
    #[must_use]
    pub const fn chat_cta() -> Self {
        Self::CtaClick {
            button_name: "Ver Mi Plan Personalizado",
            location: "chat_complete",
            page: Page::Chat,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::PageView { .. } => "page_view",
            Self::CtaClick { .. } => "cta_click",
            Self::ScrollDepth { .. } => "scroll_depth",
            Self::ChatStarted => "chat_started",
            Self::QuestionAnswered { .. } => "question_answered",
            Self::ChatCompleted => "chat_completed",
            Self::RevelationViewed { .. } => "revelation_viewed",
            Self::VslEvent { .. } => "vsl_event",
            Self::OfferRevealed { .. } => "offer_revealed",
            Self::CtaBuyClick { .. } => "cta_buy_click",
            Self::SpotsAlert { .. } => "spots_alert",
            Self::SessionExpired { .. } => "session_expired",
        }
    }

    /// Flat parameter mapping sent alongside the event name.
    #[must_use]
    pub fn params(&self) -> EventParams {
        let value = match self {
            Self::PageView { page, location } => json!({
                "page_title": page.title(),
                "page_path": page.path(),
                "page_location": location,
            }),
            Self::CtaClick {
                button_name,
                location,
                page,
            } => json!({
                "button_name": button_name,
                "button_location": location,
                "page": page.slug(),
            }),
            Self::ScrollDepth { depth_pct, page } => json!({
                "depth_percentage": depth_pct,
                "page": page.slug(),
            }),
            Self::ChatStarted | Self::ChatCompleted => json!({ "page": Page::Chat.slug() }),
            Self::QuestionAnswered {
                question_id,
                question_text,
                answer,
            } => json!({
                "question_id": question_id,
                "question_text": question_text,
                "answer": answer,
                "page": Page::Chat.slug(),
            }),
            Self::RevelationViewed {
                revelation,
                dwell_ms,
            } => json!({
                "revelation_name": revelation.name(),
                "revelation_phase": revelation.number(),
                "previous_phase_dwell_ms": dwell_ms,
                "page": Page::Result.slug(),
            }),
            Self::VslEvent { action, dwell_ms } => json!({
                "action": action,
                "video_name": "VSL Plan Personalizado",
                "previous_phase_dwell_ms": dwell_ms,
                "page": Page::Result.slug(),
            }),
            Self::OfferRevealed { dwell_ms } => json!({
                "previous_phase_dwell_ms": dwell_ms,
                "page": Page::Result.slug(),
            }),
            Self::CtaBuyClick { location } => json!({
                "button_name": "Comprar Ahora",
                "button_location": location,
                "page": Page::Result.slug(),
                "value": 1,
            }),
            Self::SpotsAlert { remaining } => json!({
                "spots_remaining": remaining,
                "page": Page::Result.slug(),
            }),
            Self::SessionExpired { phase } => json!({
                "phase": phase.slug(),
                "page": Page::Result.slug(),
            }),
        };
        match value {
            Value::Object(mut map) => {
                map.retain(|_, v| !v.is_null());
                map
            }
            _ => EventParams::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("analytics client not initialised")]
    NotReady,
    #[error("analytics client rejected {event}: {reason}")]
    Rejected { event: String, reason: String },
}

/// Destination for analytics events (e.g. `gtag`).
/// Platform-specific implementations should provide this.
pub trait AnalyticsSink {
    /// Hand one event to the client.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotReady`] when the client has not loaded yet.
    fn send(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError>;
}

impl<T: AnalyticsSink + ?Sized> AnalyticsSink for Rc<T> {
    fn send(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError> {
        (**self).send(name, params)
    }
}

/// Fire-and-forget emission: failures are logged and dropped, never retried.
pub fn emit<S: AnalyticsSink + ?Sized>(sink: &S, event: &AnalyticsEvent) {
    let name = event.name();
    match sink.send(name, &event.params()) {
        Ok(()) => log::debug!("analytics event {name}"),
        Err(AnalyticsError::NotReady) => log::warn!("analytics not ready; dropped {name}"),
        Err(err) => log::warn!("analytics event {name} dropped: {err}"),
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<(String, EventParams)>>>,
    ready: Rc<Cell<bool>>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            events: Rc::default(),
            ready: Rc::new(Cell::new(true)),
        }
    }
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose client never finished loading.
    #[must_use]
    pub fn not_ready() -> Self {
        let sink = Self::default();
        sink.ready.set(false);
        sink
    }

    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.borrow().iter().filter(|(n, _)| n == name).count()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|(n, _)| n.clone()).collect()
    }

    #[must_use]
    pub fn events(&self) -> Vec<(String, EventParams)> {
        self.events.borrow().clone()
    }
}

impl AnalyticsSink for RecordingSink {
    fn send(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError> {
        if !self.ready.get() {
            return Err(AnalyticsError::NotReady);
        }
        self.events
            .borrow_mut()
            .push((name.to_string(), params.clone()));
        Ok(())
    }
}
