//! Ordered reveal phases and the page sections they expose.
use serde::{Deserialize, Serialize};

use crate::analytics::Revelation;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Loading,
    Diagnosis,
    Video,
    UrgencyWindow,
    Offer,
}

impl Phase {
    pub const ALL: [Self; 5] = [
        Self::Loading,
        Self::Diagnosis,
        Self::Video,
        Self::UrgencyWindow,
        Self::Offer,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The only phase this one may advance to.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Loading => Some(Self::Diagnosis),
            Self::Diagnosis => Some(Self::Video),
            Self::Video => Some(Self::UrgencyWindow),
            Self::UrgencyWindow => Some(Self::Offer),
            Self::Offer => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Offer)
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Diagnosis => "diagnosis",
            Self::Video => "video",
            Self::UrgencyWindow => "urgency_window",
            Self::Offer => "offer",
        }
    }

    /// Label on the progress stepper; `Loading` has no step.
    #[must_use]
    pub const fn step_label(self) -> Option<&'static str> {
        match self {
            Self::Loading => None,
            Self::Diagnosis => Some("Diagnóstico"),
            Self::Video => Some("Vídeo"),
            Self::UrgencyWindow => Some("Ventana 72h"),
            Self::Offer => Some("Solución"),
        }
    }

    /// 1-based stepper position.
    #[must_use]
    pub const fn step_number(self) -> Option<usize> {
        match self {
            Self::Loading => None,
            other => Some(other.index()),
        }
    }

    #[must_use]
    pub const fn revelation(self) -> Option<Revelation> {
        match self {
            Self::Diagnosis => Some(Revelation::Diagnosis),
            Self::UrgencyWindow => Some(Revelation::UrgencyWindow),
            Self::Offer => Some(Revelation::Offer),
            Self::Loading | Self::Video => None,
        }
    }

    #[must_use]
    pub const fn section(self) -> Option<Section> {
        match self {
            Self::Loading => None,
            Self::Diagnosis => Some(Section::Diagnosis),
            Self::Video => Some(Section::Video),
            Self::UrgencyWindow => Some(Section::UrgencyWindow),
            Self::Offer => Some(Section::Offer),
        }
    }
}

/// Scroll targets on the result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Diagnosis,
    Video,
    UrgencyWindow,
    Offer,
}

impl Section {
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Diagnosis => "fase-diagnostico",
            Self::Video => "fase-video",
            Self::UrgencyWindow => "fase-ventana",
            Self::Offer => "fase-oferta",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_form_a_single_chain() {
        let mut walked = vec![Phase::Loading];
        while let Some(next) = walked.last().and_then(|p| p.next()) {
            walked.push(next);
        }
        assert_eq!(walked, Phase::ALL.to_vec());
        assert!(Phase::Offer.is_terminal());
    }

    #[test]
    fn stepper_skips_loading() {
        assert_eq!(Phase::Loading.step_number(), None);
        assert_eq!(Phase::Diagnosis.step_number(), Some(1));
        assert_eq!(Phase::Offer.step_number(), Some(4));
        assert_eq!(Phase::UrgencyWindow.step_label(), Some("Ventana 72h"));
    }
}
