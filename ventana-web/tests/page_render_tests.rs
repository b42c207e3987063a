use futures::executor::block_on;
use ventana_core::{AnswerField, Phase, QuizAnswers, QuizProgress, RevealConfig};
use ventana_web::components::countdown_bar::{CountdownBar, CountdownBarProps};
use ventana_web::components::stepper::{Stepper, StepperProps};
use ventana_web::components::video::{VideoProps, VideoSection};
use ventana_web::driver::RevealSnapshot;
use ventana_web::pages::{
    landing::{LandingView, LandingViewProps},
    not_found::{NotFound, Props as NotFoundProps},
    quiz::{QuizView, QuizViewProps},
    result::{ResultView, ResultViewProps},
};
use yew::{Callback, LocalServerRenderer};

fn answers(gender: &str) -> QuizAnswers {
    let mut answers = QuizAnswers::default();
    answers.set(AnswerField::Gender, gender);
    answers.set(AnswerField::TimeSeparation, "1-3 meses");
    answers.set(AnswerField::WhoEnded, "Ella terminó conmigo");
    answers
}

fn snapshot(phase: Phase) -> RevealSnapshot {
    RevealSnapshot {
        phase,
        ..RevealSnapshot::initial(&RevealConfig::default())
    }
}

fn render_result(props: ResultViewProps) -> String {
    block_on(LocalServerRenderer::<ResultView>::with_props(props).render())
}

fn result_props(snapshot: RevealSnapshot) -> ResultViewProps {
    ResultViewProps {
        answers: answers("HOMBRE"),
        snapshot,
        loading_progress: 0,
        on_continue: Callback::noop(),
        on_reveal: Callback::noop(),
        on_buy: Callback::noop(),
        on_reload: Callback::noop(),
    }
}

#[test]
fn landing_shows_counter_and_primary_cta() {
    let props = LandingViewProps {
        user_count: 6_412,
        on_start: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LandingView>::with_props(props).render());
    assert!(html.contains("6412"));
    assert!(html.contains("usuarios siendo analizados ahora"));
    assert!(html.contains("INICIAR ANÁLISIS AHORA"));
    assert!(html.contains("cta-section"));
}

#[test]
fn quiz_asks_first_question_with_coded_options() {
    let props = QuizViewProps {
        progress: QuizProgress::new(),
        on_answer: Callback::noop(),
        on_finish: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<QuizView>::with_props(props).render());
    assert!(html.contains("Pregunta 1 de 6"));
    assert!(html.contains("¿eres hombre o mujer?"));
    assert!(html.contains("data-value=\"MUJER\""));
    assert!(html.contains("Soy hombre"));
    assert!(!html.contains("VER MI DIAGNÓSTICO"));
}

#[test]
fn quiz_personalises_options_after_gender_answer() {
    let mut progress = QuizProgress::new();
    progress.answer("MUJER").unwrap();
    progress.answer("1-3 meses").unwrap();
    let props = QuizViewProps {
        progress,
        on_answer: Callback::noop(),
        on_finish: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<QuizView>::with_props(props).render());
    assert!(html.contains("Pregunta 3 de 6"));
    assert!(html.contains("Él terminó conmigo"));
}

#[test]
fn completed_quiz_offers_the_diagnosis() {
    let mut progress = QuizProgress::new();
    for question in &ventana_core::QUESTIONS {
        let first = question.options(progress.answers().gender()).remove(0);
        progress.answer(&first.value).unwrap();
    }
    assert!(progress.is_complete());
    let props = QuizViewProps {
        progress,
        on_answer: Callback::noop(),
        on_finish: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<QuizView>::with_props(props).render());
    assert!(html.contains("¡TU ANÁLISIS ESTÁ LISTO!"));
    assert!(html.contains("VER MI DIAGNÓSTICO"));
    assert!(!html.contains("chat-option"));
}

#[test]
fn result_loading_shows_only_the_analysis_panel() {
    let mut props = result_props(snapshot(Phase::Loading));
    props.loading_progress = 40;
    let html = render_result(props);
    assert!(html.contains("ANALIZANDO TU CASO"));
    assert!(html.contains("40%"));
    assert!(!html.contains("progress-step"));
    assert!(!html.contains("fase-diagnostico"));
}

#[test]
fn result_diagnosis_waits_for_continue() {
    let mut snap = snapshot(Phase::Diagnosis);
    snap.awaiting_continue = true;
    let html = render_result(result_props(snap));
    assert!(html.contains("fase-diagnostico"));
    assert!(html.contains("Por Qué Ella Se Fue"));
    assert!(html.contains("1-3 meses"));
    assert!(html.contains("No especificado"));
    assert!(html.contains("CONTINUAR"));
    assert!(!html.contains("ANALIZANDO TU CASO"));
    assert!(!html.contains("fase-video"));
}

#[test]
fn result_sections_accumulate_through_urgency_window() {
    let mut snap = snapshot(Phase::UrgencyWindow);
    snap.video_unlocked = true;
    snap.can_reveal_offer = true;
    let html = render_result(result_props(snap));
    assert!(html.contains("fase-diagnostico"));
    assert!(html.contains("fase-video"));
    assert!(html.contains("fase-ventana"));
    assert!(html.contains("LA VENTANA DE 72 HORAS"));
    assert!(html.contains("QUIERO VER LA SOLUCIÓN AHORA"));
    assert!(!html.contains("Preparando tu vídeo"));
    assert!(!html.contains("fase-oferta"));
}

#[test]
fn result_offer_shows_price_and_clock() {
    let mut snap = snapshot(Phase::Offer);
    snap.video_unlocked = true;
    snap.offer_revealed = true;
    snap.remaining_secs = 125;
    let mut props = result_props(snap);
    props.answers = answers("MUJER");
    let html = render_result(props);
    assert!(html.contains("fase-oferta"));
    assert!(html.contains("Tu Plan de 21 Días para Reconquistar a Él"));
    assert!(html.contains("SÍ, QUIERO MI PLAN PARA RECONQUISTAR A ÉL"));
    assert!(html.contains("R$ 97"));
    assert!(html.contains("2:05"));
    assert!(!html.contains("QUIERO VER LA SOLUCIÓN AHORA"));
}

#[test]
fn stepper_marks_completed_and_active_steps() {
    let html = block_on(
        LocalServerRenderer::<Stepper>::with_props(StepperProps {
            phase: Phase::UrgencyWindow,
        })
        .render(),
    );
    assert_eq!(html.matches("completed").count(), 2);
    assert!(html.contains("active"));
    assert!(html.contains("Ventana 72h"));
    assert!(html.contains("Solución"));

    let hidden = block_on(
        LocalServerRenderer::<Stepper>::with_props(StepperProps {
            phase: Phase::Loading,
        })
        .render(),
    );
    assert!(!hidden.contains("progress-step"));
}

#[test]
fn countdown_bar_formats_clock_and_spots() {
    let html = block_on(
        LocalServerRenderer::<CountdownBar>::with_props(CountdownBarProps {
            remaining_secs: 47 * 60,
            spots_remaining: 12,
        })
        .render(),
    );
    assert!(html.contains("47:00"));
    assert!(html.contains("Quedan 12 cupos"));
}

#[test]
fn video_section_reports_embed_failure() {
    let html = block_on(
        LocalServerRenderer::<VideoSection>::with_props(VideoProps {
            unlocked: true,
            embed_error: Some("player script failed".into()),
            on_reload: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("No pudimos cargar el vídeo."));
    assert!(html.contains("Recargar página"));
    assert!(html.contains("vsl-placeholder"));
}

#[test]
fn not_found_links_home() {
    let html = block_on(
        LocalServerRenderer::<NotFound>::with_props(NotFoundProps {
            on_go_home: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("Página no encontrada"));
    assert!(html.contains("Volver al inicio"));
}
