use ventana_core::Phase;
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct StepperProps {
    pub phase: Phase,
}

/// Four-step progress indicator. Hidden while loading.
#[function_component(Stepper)]
pub fn stepper(props: &StepperProps) -> Html {
    let Some(current) = props.phase.step_number() else {
        return Html::default();
    };
    html! {
        <ol class="progress-bar-container fade-in" aria-label="Progreso">
            { for Phase::ALL.iter().filter_map(|phase| {
                let label = phase.step_label()?;
                let number = phase.step_number()?;
                let class = classes!(
                    "progress-step",
                    (number < current).then_some("completed"),
                    (number == current).then_some("active"),
                );
                let marker = if number < current { "✅".to_string() } else { number.to_string() };
                Some(html! {
                    <li class={class} aria-current={(number == current).then_some("step")}>
                        <div class="step-circle">{ marker }</div>
                        <span class="step-label">{ label }</span>
                    </li>
                })
            })}
        </ol>
    }
}
