use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use ventana_web::dom;

fn mount_block(id: &str, height_px: u32) -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(existing) = doc.get_element_by_id(id) {
        existing.remove();
    }
    let el = doc.create_element("div").expect("create block");
    el.set_id(id);
    el.set_attribute("style", &format!("height: {height_px}px;"))
        .expect("style block");
    doc.body().expect("body").append_child(&el).expect("append block");
    el
}

#[wasm_bindgen_test]
fn now_reads_wall_clock() {
    assert!(dom::now().as_millis() > 1_600_000_000_000);
}

#[wasm_bindgen_test]
fn js_error_message_prefers_error_text() {
    let err: JsValue = js_sys::Error::new("boom").into();
    assert_eq!(dom::js_error_message(&err), "boom");
    assert_eq!(dom::js_error_message(&JsValue::from_str("plain")), "plain");
}

#[wasm_bindgen_test]
fn replace_query_keeps_path() {
    let before = dom::window()
        .expect("window")
        .location()
        .pathname()
        .expect("pathname");
    dom::replace_query("?utm_source=fb");
    assert_eq!(dom::location_search(), "?utm_source=fb");
    let after = dom::window()
        .expect("window")
        .location()
        .pathname()
        .expect("pathname");
    assert_eq!(before, after);
    dom::replace_query("");
}

#[wasm_bindgen_test]
fn geometry_helpers_measure_mounted_elements() {
    mount_block("geometry-block", 40);
    assert!(dom::element_bottom("geometry-block").is_some());
    let fraction = dom::visible_fraction("geometry-block").expect("fraction");
    assert!((0.0..=1.0).contains(&fraction));
    assert!(dom::element_bottom("no-such-element").is_none());
}

#[wasm_bindgen_test]
fn scroll_listener_detaches_on_drop() {
    let listener = dom::ScrollListener::attach(|_| {}).expect("attach listener");
    drop(listener);
    let win = dom::window().expect("window");
    win.dispatch_event(&web_sys::Event::new("scroll").expect("event"))
        .expect("dispatch scroll");
}
