use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use yew::Callback;

use ventana_core::{Phase, RevealConfig, Scope, UnlockPacing};
use ventana_web::dom;
use ventana_web::driver::{RevealDriver, RevealSnapshot};

const EVENTS_KEY: &str = "__ventanaEvents";

fn fast_config() -> RevealConfig {
    let mut cfg = RevealConfig::default();
    cfg.loading_ms = 20;
    cfg.scroll_follow_up_ms = 5;
    cfg.diagnosis.auto_advance_ms = Some(200);
    cfg.diagnosis.manual_continue = true;
    cfg.video.fallback_ms = None;
    cfg.video.time_on_page_secs = None;
    cfg.video.unlock = UnlockPacing::Fixed { delay_ms: 60_000 };
    cfg
}

/// Stand-in for `gtag` that records event names on the window.
fn install_recording_tag() {
    let win = dom::window().expect("window");
    Reflect::set(&win, &JsValue::from_str(EVENTS_KEY), &Array::new()).expect("events array");
    let gtag = Function::new_with_args(
        "kind, name, params",
        "window.__ventanaEvents.push(name);",
    );
    Reflect::set(&win, &JsValue::from_str("gtag"), &gtag).expect("install gtag");
}

/// Remove the stand-in and hand back what it saw.
fn take_recorded_events() -> Vec<String> {
    let win = dom::window().expect("window");
    let recorded = Reflect::get(&win, &JsValue::from_str(EVENTS_KEY)).expect("events array");
    Reflect::delete_property(&win, &JsValue::from_str("gtag")).expect("remove gtag");
    Reflect::delete_property(&win, &JsValue::from_str(EVENTS_KEY)).expect("remove events");
    Array::from(&recorded)
        .iter()
        .filter_map(|name| name.as_string())
        .collect()
}

fn entries_into(history: &[RevealSnapshot], phase: Phase) -> usize {
    let mut previous = Phase::Loading;
    let mut entries = 0;
    for snapshot in history {
        if snapshot.phase == phase && previous != phase {
            entries += 1;
        }
        previous = snapshot.phase;
    }
    entries
}

#[wasm_bindgen_test]
async fn continue_enters_video_once_and_cancels_the_auto_advance() {
    dom::local_storage()
        .expect("localStorage")
        .clear()
        .expect("clear storage");
    install_recording_tag();

    let history = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&history);
    let driver = RevealDriver::start(
        fast_config(),
        Callback::from(move |snapshot: RevealSnapshot| sink.borrow_mut().push(snapshot)),
    );

    TimeoutFuture::new(80).await;
    let before = driver.borrow().snapshot(dom::now());
    assert_eq!(before.phase, Phase::Diagnosis);
    assert!(before.awaiting_continue);
    assert_eq!(driver.borrow().armed(Scope::Phase(Phase::Diagnosis)), 2);

    RevealDriver::buy(&driver);
    RevealDriver::confirm_continue(&driver);
    assert_eq!(driver.borrow().armed(Scope::Phase(Phase::Diagnosis)), 0);

    // Well past the point where the Diagnosis timer would have fired.
    TimeoutFuture::new(300).await;
    let after = driver.borrow().snapshot(dom::now());
    driver.borrow_mut().shutdown();
    let events = take_recorded_events();

    assert_eq!(after.phase, Phase::Video);
    assert!(!after.offer_revealed);
    let history = history.borrow();
    assert_eq!(entries_into(&history, Phase::Video), 1);
    assert_eq!(entries_into(&history, Phase::UrgencyWindow), 0);
    assert_eq!(events.iter().filter(|name| *name == "vsl_event").count(), 1);
    assert!(!events.iter().any(|name| name == "cta_buy_click"));
}

#[wasm_bindgen_test]
async fn shutdown_drops_every_pending_timer() {
    dom::local_storage()
        .expect("localStorage")
        .clear()
        .expect("clear storage");
    let driver = RevealDriver::start(fast_config(), Callback::noop());
    assert_eq!(driver.borrow().armed(Scope::Phase(Phase::Loading)), 1);

    driver.borrow_mut().shutdown();
    TimeoutFuture::new(80).await;
    assert_eq!(driver.borrow().armed(Scope::Phase(Phase::Loading)), 0);
    assert_eq!(driver.borrow().snapshot(dom::now()).phase, Phase::Loading);
}
