//! Fixed quiz catalogue and one-question-at-a-time progress.
use crate::analytics::AnalyticsEvent;
use crate::answers::{AnswerField, Gender, QuizAnswers};
use crate::storage::{FunnelStore, KeyValueStorage};

/// Stand-in replaced by the ex-partner pronoun ("Ella" / "Él").
const EX: &str = "{ex}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    /// Stored answer; the label itself when `None`.
    pub value: Option<&'static str>,
}

impl Choice {
    const fn plain(label: &'static str) -> Self {
        Self { label, value: None }
    }

    const fn coded(label: &'static str, value: &'static str) -> Self {
        Self {
            label,
            value: Some(value),
        }
    }
}

/// A choice resolved for the visitor's gender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub field: AnswerField,
    pub prompt: &'static str,
    pub choices: &'static [Choice],
}

impl Question {
    #[must_use]
    pub fn options(&self, gender: Gender) -> Vec<QuizOption> {
        let ex = gender.ex_pronoun_title();
        self.choices
            .iter()
            .map(|choice| QuizOption {
                label: choice.label.replace(EX, ex),
                value: choice.value.unwrap_or(choice.label).replace(EX, ex),
            })
            .collect()
    }
}

pub static QUESTIONS: [Question; 6] = [
    Question {
        id: 1,
        field: AnswerField::Gender,
        prompt: "Para personalizar tu análisis, ¿eres hombre o mujer?",
        choices: &[
            Choice::coded("Soy hombre", "HOMBRE"),
            Choice::coded("Soy mujer", "MUJER"),
        ],
    },
    Question {
        id: 2,
        field: AnswerField::TimeSeparation,
        prompt: "¿Cuánto tiempo llevan separados?",
        choices: &[
            Choice::plain("Menos de 1 mes"),
            Choice::plain("1-3 meses"),
            Choice::plain("3-6 meses"),
            Choice::plain("Más de 6 meses"),
        ],
    },
    Question {
        id: 3,
        field: AnswerField::WhoEnded,
        prompt: "¿Quién terminó la relación?",
        choices: &[
            Choice::plain("{ex} terminó conmigo"),
            Choice::plain("Yo terminé"),
            Choice::plain("Fue una decisión mutua"),
        ],
    },
    Question {
        id: 4,
        field: AnswerField::CurrentSituation,
        prompt: "¿Cómo está el contacto entre ustedes ahora?",
        choices: &[
            Choice::plain("No hay contacto"),
            Choice::plain("Hablamos de vez en cuando"),
            Choice::plain("Hablamos casi todos los días"),
            Choice::plain("{ex} me bloqueó"),
        ],
    },
    Question {
        id: 5,
        field: AnswerField::CommitmentLevel,
        prompt: "¿Qué tan dispuesto/a estás a seguir un plan paso a paso?",
        choices: &[
            Choice::plain("Haré lo que sea necesario"),
            Choice::plain("Muy dispuesto/a"),
            Choice::plain("Todavía tengo dudas"),
        ],
    },
    Question {
        id: 6,
        field: AnswerField::Reason,
        prompt: "¿Cuál fue el motivo principal de la ruptura?",
        choices: &[
            Choice::plain("Peleas constantes"),
            Choice::plain("Celos"),
            Choice::plain("Rutina y falta de pasión"),
            Choice::plain("Otra persona"),
            Choice::plain("Distancia"),
        ],
    },
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz already complete")]
    Complete,
    #[error("quiz is not complete yet ({answered} of {total} answered)")]
    Incomplete { answered: usize, total: usize },
    #[error("{value:?} is not an option for question {question}")]
    UnknownOption { question: u32, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizProgress {
    answers: QuizAnswers,
    index: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.index)
    }

    /// Options for the current question, resolved for the gender answered so far.
    #[must_use]
    pub fn current_options(&self) -> Vec<QuizOption> {
        self.current()
            .map(|q| q.options(self.answers.gender()))
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn answered(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        QUESTIONS.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.index >= QUESTIONS.len()
    }

    #[must_use]
    pub const fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    /// Record `value` for the current question and move on.
    ///
    /// # Errors
    ///
    /// Returns an error when the quiz is finished or `value` is not one of the
    /// current question's options.
    pub fn answer(&mut self, value: &str) -> Result<AnalyticsEvent, QuizError> {
        let question = self.current().ok_or(QuizError::Complete)?;
        let option = self
            .current_options()
            .into_iter()
            .find(|option| option.value == value)
            .ok_or_else(|| QuizError::UnknownOption {
                question: question.id,
                value: value.to_string(),
            })?;
        self.answers.set(question.field, option.value.clone());
        self.index += 1;
        Ok(AnalyticsEvent::QuestionAnswered {
            question_id: question.id,
            question_text: question.prompt.to_string(),
            answer: option.label,
        })
    }

    /// Persist the finished answers for the result page.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::Incomplete`] before the last question is answered.
    pub fn complete<S: KeyValueStorage>(
        &self,
        store: &FunnelStore<S>,
    ) -> Result<AnalyticsEvent, QuizError> {
        if !self.is_complete() {
            return Err(QuizError::Incomplete {
                answered: self.index,
                total: QUESTIONS.len(),
            });
        }
        store.save_quiz_answers(&self.answers);
        log::info!("quiz completed");
        Ok(AnalyticsEvent::ChatCompleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn catalogue_covers_every_field_in_order() {
        let fields: Vec<AnswerField> = QUESTIONS.iter().map(|q| q.field).collect();
        assert_eq!(fields, AnswerField::ALL.to_vec());
        assert!(QUESTIONS.iter().all(|q| !q.choices.is_empty()));
    }

    #[test]
    fn options_follow_gender() {
        let who_ended = &QUESTIONS[2];
        assert_eq!(who_ended.options(Gender::Mujer)[0].value, "Él terminó conmigo");
        assert_eq!(who_ended.options(Gender::Hombre)[0].label, "Ella terminó conmigo");
        assert_eq!(QUESTIONS[0].options(Gender::Hombre)[1].value, "MUJER");
    }

    #[test]
    fn full_run_persists_answers() {
        let store = FunnelStore::new(MemoryStorage::new());
        let mut quiz = QuizProgress::new();
        assert_eq!(
            quiz.complete(&store),
            Err(QuizError::Incomplete {
                answered: 0,
                total: 6
            })
        );

        let event = quiz.answer("MUJER").unwrap();
        assert_eq!(
            event,
            AnalyticsEvent::QuestionAnswered {
                question_id: 1,
                question_text: QUESTIONS[0].prompt.to_string(),
                answer: "Soy mujer".to_string(),
            }
        );
        for value in [
            "Menos de 1 mes",
            "Él terminó conmigo",
            "No hay contacto",
            "Muy dispuesto/a",
            "Celos",
        ] {
            quiz.answer(value).unwrap();
        }
        assert!(quiz.is_complete());
        assert_eq!(quiz.answer("Celos"), Err(QuizError::Complete));
        assert_eq!(quiz.complete(&store), Ok(AnalyticsEvent::ChatCompleted));

        let stored = store.quiz_answers();
        assert_eq!(stored.gender(), Gender::Mujer);
        assert_eq!(stored.display(AnswerField::WhoEnded), "Él terminó conmigo");
        assert_eq!(stored.display(AnswerField::Reason), "Celos");
    }

    #[test]
    fn rejects_values_outside_the_catalogue() {
        let mut quiz = QuizProgress::new();
        let err = quiz.answer("OTRO").unwrap_err();
        assert_eq!(
            err,
            QuizError::UnknownOption {
                question: 1,
                value: "OTRO".to_string()
            }
        );
        assert_eq!(quiz.answered(), 0);
    }
}
