use std::time::Duration;

use ventana_core::Gender;
use ventana_core::content::{loading_message, loading_steps};
use yew::prelude::*;

/// Milliseconds represented by one percent of the loading bar.
const MS_PER_PERCENT: u64 = 25;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct LoadingPanelProps {
    pub gender: Gender,
    /// 0..=100
    pub progress: u8,
}

#[function_component(LoadingPanel)]
pub fn loading_panel(props: &LoadingPanelProps) -> Html {
    let progress = props.progress.min(100);
    let elapsed = Duration::from_millis(u64::from(progress) * MS_PER_PERCENT);
    let steps = loading_steps(props.gender);
    let reached = steps.iter().filter(|step| step.at <= elapsed).count();
    let seconds_left = (100 - u32::from(progress)).div_ceil(10);
    html! {
        <div class="revelation fade-in loading-box-custom" aria-busy="true">
            <div class="loading-inner">
                <div class="spin-brain">{ "🧠" }</div>
                <h2>{ "ANALIZANDO TU CASO" }</h2>
                <p>{ loading_message(props.gender) }</p>
                <div class="loading-steps-list">
                    { for steps.iter().enumerate().map(|(idx, step)| {
                        let active = idx < reached;
                        let done = idx + 1 < reached;
                        html! {
                            <div class={classes!("loading-step-item", active.then_some("active"))}>
                                { if done { "✅" } else { step.icon } }{ " " }{ step.text.clone() }
                            </div>
                        }
                    })}
                </div>
                <div class="progress-outer">
                    <div class="progress-inner" style={format!("width: {progress}%")}></div>
                </div>
                <div class="progress-labels">
                    <span>{ format!("{progress}%") }</span>
                    <span>{ format!("⏱️ {seconds_left}s...") }</span>
                </div>
            </div>
        </div>
    }
}
