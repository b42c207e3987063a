//! Gender-personalised copy for the result page.
//!
//! Every function is total over [`Gender`]; an absent or unrecognised gender
//! answer resolves to [`Gender::Hombre`] before it reaches these functions.
use std::time::Duration;

use crate::answers::{AnswerField, Gender, QuizAnswers, UNSPECIFIED};

#[must_use]
pub fn title(gender: Gender) -> String {
    format!("Por Qué {} Se Fue", gender.ex_pronoun_title())
}

#[must_use]
pub fn loading_message(gender: Gender) -> String {
    format!(
        "Generando tu protocolo específico para reconquistar a {}...",
        gender.ex_pronoun()
    )
}

/// One entry of the loading checklist, shown once `at` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingStep {
    pub icon: &'static str,
    pub text: String,
    pub at: Duration,
}

#[must_use]
pub fn loading_steps(gender: Gender) -> Vec<LoadingStep> {
    vec![
        LoadingStep {
            icon: "📊",
            text: "Respuestas procesadas".to_string(),
            at: Duration::ZERO,
        },
        LoadingStep {
            icon: "🧠",
            text: loading_message(gender),
            at: Duration::from_secs(2),
        },
    ]
}

/// Rows of the "tu situación específica" summary box.
#[must_use]
pub fn summary_rows(answers: &QuizAnswers) -> [(&'static str, &str); 4] {
    [
        ("Tiempo", answers.display(AnswerField::TimeSeparation)),
        ("Quién terminó", answers.display(AnswerField::WhoEnded)),
        ("Contacto", answers.display(AnswerField::CurrentSituation)),
        ("Compromiso", answers.display(AnswerField::CommitmentLevel)),
    ]
}

/// Multi-paragraph diagnosis. Paragraphs are separated by blank lines.
#[must_use]
pub fn diagnosis_copy(answers: &QuizAnswers) -> String {
    let gender = answers.gender();
    let who_ended = answers.display(AnswerField::WhoEnded);
    let time_separation = answers.display(AnswerField::TimeSeparation);
    let current_situation = answers.display(AnswerField::CurrentSituation);
    let reason = answers
        .raw(AnswerField::Reason)
        .filter(|reason| *reason != UNSPECIFIED);

    let intro = if who_ended.contains("Ella") || who_ended.contains("Él") {
        format!(
            "{} decidió terminar la relación, lo que indica un desgaste en su percepción de tu valor.",
            gender.ex_pronoun_title()
        )
    } else {
        "Fuiste tú quien terminó, ahora el desafío es revertir el sentimiento de rechazo y crear una nueva oportunidad.".to_string()
    };

    let urgency = if time_separation.contains("Menos de 1 mes") || time_separation.contains("1-3 meses")
    {
        "Estás en la **ventana de tiempo IDEAL**. Su cerebro aún tiene rastros químicos de tu presencia.".to_string()
    } else {
        format!(
            "Aunque ha pasado tiempo ({time_separation}), las memorias emocionales pueden reactivarse con los estímulos correctos."
        )
    };

    let insight = if current_situation.contains("No hay contacto") {
        "La falta de contacto es, irónicamente, tu mayor ventaja. Preparamos el terreno para un regreso impactante."
    } else {
        "El contacto actual indica que el hilo emocional no se ha cortado. Debemos evitar saturar su sistema de dopamina."
    };

    let mut bullets = format!(
        "**Tu situación específica:**\n- **Tiempo de separación:** {time_separation}\n- **Quién terminó:** {who_ended}\n- **Situación actual:** {current_situation}"
    );
    if let Some(reason) = reason {
        bullets.push_str(&format!("\n- **Motivo principal:** {reason}"));
    }

    let mut paragraphs = vec![
        "No fue por falta de amor.".to_string(),
        intro,
        bullets,
        urgency,
        insight.to_string(),
    ];
    if let Some(reason) = reason {
        paragraphs.push(format!(
            "El motivo principal fue \"{reason}\". El protocolo se enfocará en neutralizar esa objeción específica."
        ));
    }
    let pronoun = gender.ex_pronoun();
    paragraphs.push(format!(
        "La clave no es rogar, sino entender la psicología de {pronoun} y actuar de forma estratégica. En el siguiente paso, voy a revelar EXACTAMENTE el paso a paso científico para que {pronoun} sienta que SÍ eres la persona correcta."
    ));
    paragraphs.join("\n\n")
}

#[must_use]
pub fn urgency_window_copy(gender: Gender) -> String {
    format!(
        "Aquí está lo crucial:\n\nEn cada una de estas 3 fases, hay acciones CORRECTAS e INCORRECTAS.\n\nSi actúas correcto en cada fase, {} te busca.\nSi actúas incorrecto, su cerebro borra la atracción.\n\nTu plan personalizado revela EXACTAMENTE qué hacer en cada fase.",
        gender.ex_pronoun()
    )
}

/// The three stages of the 72-hour window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowStage {
    First,
    Second,
    Third,
}

impl WindowStage {
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "0-24h",
            Self::Second => "24-48h",
            Self::Third => "48-72h",
        }
    }
}

#[must_use]
pub fn phase_description(gender: Gender, stage: WindowStage) -> String {
    let ex = gender.ex_pronoun_title();
    match stage {
        WindowStage::First => format!("Dopamina cae 67% → {ex} siente \"alivio\""),
        WindowStage::Second => {
            format!("Oxitocina se desconecta → {ex} \"olvida\" los buenos momentos")
        }
        WindowStage::Third => {
            format!("Córtex prefrontal reescribe memorias → {ex} te ve diferente")
        }
    }
}

#[must_use]
pub fn offer_title(gender: Gender) -> String {
    format!(
        "Tu Plan de 21 Días para Reconquistar a {}",
        gender.ex_pronoun_title()
    )
}

#[must_use]
pub fn features(gender: Gender) -> Vec<String> {
    let ex = gender.ex_pronoun_title();
    let ex_lower = gender.ex_pronoun();
    vec![
        format!("📱 MÓDULO 1: Cómo Hablar Con {ex} (Días 1-7)"),
        format!("👥 MÓDULO 2: Cómo Encontrarte Con {ex} (Días 8-14)"),
        format!(
            "❤️ MÓDULO 3: Cómo Reconquistar{} (Días 15-21)",
            gender.object_suffix()
        ),
        format!(
            "🚨 MÓDULO 4: Protocolo de Emergencia (Si {ex_lower} está con {})",
            gender.rival()
        ),
        "⚡ Guía especial: Las 3 Fases de 72 Horas".to_string(),
        "🎯 Bonos: Scripts de conversación + Planes de acción".to_string(),
        "✅ Garantía: 30 días o tu dinero de vuelta".to_string(),
    ]
}

#[must_use]
pub fn call_to_action_label(gender: Gender) -> String {
    format!(
        "SÍ, QUIERO MI PLAN PARA RECONQUISTAR A {}",
        gender.ex_pronoun_title().to_uppercase()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionBadge {
    pub title: &'static str,
    pub subtitle: String,
}

#[must_use]
pub fn completion_badge(gender: Gender) -> CompletionBadge {
    let pronoun = gender.ex_pronoun();
    CompletionBadge {
        title: "¡TU ANÁLISIS ESTÁ LISTO!",
        subtitle: format!(
            "Descubre exactamente por qué {pronoun} se fue y el paso a paso científico para que {pronoun} QUIERA volver"
        ),
    }
}
