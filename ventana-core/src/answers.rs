//! Quiz answers collected by the chat flow and read by the result page.
use serde::{Deserialize, Serialize};

/// Placeholder rendered for any answer the visitor never gave.
pub const UNSPECIFIED: &str = "No especificado";

/// Who the visitor is; selects which ex-partner pronouns the copy uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// The visitor is a man trying to win *her* back.
    #[default]
    #[serde(rename = "HOMBRE")]
    Hombre,
    /// The visitor is a woman trying to win *him* back.
    #[serde(rename = "MUJER")]
    Mujer,
}

impl Gender {
    /// Resolve a stored answer. Absent, blank or unrecognised values fall back to the default.
    #[must_use]
    pub fn from_answer(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("MUJER") => Self::Mujer,
            Some(v) if v.eq_ignore_ascii_case("HOMBRE") => Self::Hombre,
            _ => Self::default(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hombre => "HOMBRE",
            Self::Mujer => "MUJER",
        }
    }

    /// Lowercase pronoun for the ex-partner ("ella" / "él").
    #[must_use]
    pub const fn ex_pronoun(self) -> &'static str {
        match self {
            Self::Hombre => "ella",
            Self::Mujer => "él",
        }
    }

    /// Capitalised pronoun for the ex-partner ("Ella" / "Él").
    #[must_use]
    pub const fn ex_pronoun_title(self) -> &'static str {
        match self {
            Self::Hombre => "Ella",
            Self::Mujer => "Él",
        }
    }

    /// Enclitic object pronoun ("reconquistarla" / "reconquistarlo").
    #[must_use]
    pub const fn object_suffix(self) -> &'static str {
        match self {
            Self::Hombre => "la",
            Self::Mujer => "lo",
        }
    }

    /// "another one" agreeing with the ex-partner's new partner.
    #[must_use]
    pub const fn rival(self) -> &'static str {
        match self {
            Self::Hombre => "otro",
            Self::Mujer => "otra",
        }
    }
}

/// Named answer slots in the order the quiz asks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerField {
    Gender,
    TimeSeparation,
    WhoEnded,
    CurrentSituation,
    CommitmentLevel,
    Reason,
}

impl AnswerField {
    pub const ALL: [Self; 6] = [
        Self::Gender,
        Self::TimeSeparation,
        Self::WhoEnded,
        Self::CurrentSituation,
        Self::CommitmentLevel,
        Self::Reason,
    ];

    /// Key used in the persisted JSON object.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::TimeSeparation => "timeSeparation",
            Self::WhoEnded => "whoEnded",
            Self::CurrentSituation => "currentSituation",
            Self::CommitmentLevel => "commitmentLevel",
            Self::Reason => "reason",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub time_separation: Option<String>,
    #[serde(default)]
    pub who_ended: Option<String>,
    #[serde(default)]
    pub current_situation: Option<String>,
    #[serde(default)]
    pub commitment_level: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl QuizAnswers {
    #[must_use]
    pub fn gender(&self) -> Gender {
        Gender::from_answer(self.gender.as_deref())
    }

    /// Raw answer, `None` when absent or blank.
    #[must_use]
    pub fn raw(&self, field: AnswerField) -> Option<&str> {
        self.slot(field)
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Answer ready for display; never blank.
    #[must_use]
    pub fn display(&self, field: AnswerField) -> &str {
        self.raw(field).unwrap_or(UNSPECIFIED)
    }

    /// Whether the visitor actually answered (the placeholder does not count).
    #[must_use]
    pub fn is_specified(&self, field: AnswerField) -> bool {
        self.raw(field).is_some_and(|v| v != UNSPECIFIED)
    }

    pub fn set(&mut self, field: AnswerField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Parse the persisted JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object of string fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    const fn slot(&self, field: AnswerField) -> &Option<String> {
        match field {
            AnswerField::Gender => &self.gender,
            AnswerField::TimeSeparation => &self.time_separation,
            AnswerField::WhoEnded => &self.who_ended,
            AnswerField::CurrentSituation => &self.current_situation,
            AnswerField::CommitmentLevel => &self.commitment_level,
            AnswerField::Reason => &self.reason,
        }
    }

    const fn slot_mut(&mut self, field: AnswerField) -> &mut Option<String> {
        match field {
            AnswerField::Gender => &mut self.gender,
            AnswerField::TimeSeparation => &mut self.time_separation,
            AnswerField::WhoEnded => &mut self.who_ended,
            AnswerField::CurrentSituation => &mut self.current_situation,
            AnswerField::CommitmentLevel => &mut self.commitment_level,
            AnswerField::Reason => &mut self.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_defaults_when_absent_or_unknown() {
        assert_eq!(Gender::from_answer(None), Gender::Hombre);
        assert_eq!(Gender::from_answer(Some("  ")), Gender::Hombre);
        assert_eq!(Gender::from_answer(Some("otro")), Gender::Hombre);
        assert_eq!(Gender::from_answer(Some("mujer")), Gender::Mujer);
        assert_eq!(Gender::from_answer(Some("HOMBRE")), Gender::Hombre);
    }

    #[test]
    fn missing_fields_display_placeholder() {
        let mut answers = QuizAnswers::default();
        answers.set(AnswerField::TimeSeparation, "1-3 meses");
        answers.set(AnswerField::Reason, "   ");
        assert_eq!(answers.display(AnswerField::TimeSeparation), "1-3 meses");
        assert_eq!(answers.display(AnswerField::WhoEnded), UNSPECIFIED);
        assert_eq!(answers.display(AnswerField::Reason), UNSPECIFIED);
        assert!(!answers.is_specified(AnswerField::Reason));
    }

    #[test]
    fn parses_camel_case_payload_with_gaps() {
        let answers = QuizAnswers::from_json(
            r#"{"gender":"MUJER","timeSeparation":"Menos de 1 mes","extra":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(answers.gender(), Gender::Mujer);
        assert_eq!(answers.raw(AnswerField::TimeSeparation), Some("Menos de 1 mes"));
        assert_eq!(answers.raw(AnswerField::CommitmentLevel), None);
        let json = serde_json::to_value(&answers).unwrap();
        assert!(json.get(AnswerField::TimeSeparation.key()).is_some());
    }
}
