use wasm_bindgen_test::*;

use ventana_core::{AnalyticsError, AnalyticsEvent, AnalyticsSink, Page};
use ventana_web::analytics::GtagSink;
use ventana_web::app::App;
use ventana_web::dom;

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

#[wasm_bindgen_test]
fn gtag_sink_is_not_ready_without_tag() {
    let event = AnalyticsEvent::PageView {
        page: Page::Landing,
        location: None,
    };
    let result = GtagSink.send(event.name(), &event.params());
    assert!(matches!(result, Err(AnalyticsError::NotReady)));
}

#[wasm_bindgen_test]
async fn app_mounts_into_root() {
    let root = ensure_app_root();
    yew::Renderer::<App>::with_root(root.clone()).render();
    gloo_timers::future::TimeoutFuture::new(50).await;
    assert!(root.child_element_count() > 0);
}
