use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_test::*;

use ventana_core::{EmbedHost, EmbedSpec, ensure_embed};
use ventana_web::dom;
use ventana_web::embed::DomEmbedHost;

fn spec() -> EmbedSpec {
    EmbedSpec {
        player_id: "vid-test-player".to_string(),
        script_src: "https://127.0.0.1:9/player.js".to_string(),
        container_selector: "#embed-host .vsl-placeholder".to_string(),
    }
}

fn mount_container() {
    let doc = dom::document().expect("document");
    if let Some(existing) = doc.get_element_by_id("embed-host") {
        existing.remove();
    }
    let section = doc.create_element("section").expect("section");
    section.set_id("embed-host");
    section.set_inner_html(r#"<div class="vsl-placeholder"></div>"#);
    doc.body().expect("body").append_child(&section).expect("append");
}

#[wasm_bindgen_test]
fn ensure_embed_is_idempotent_in_the_document() {
    mount_container();
    let host = DomEmbedHost::new();
    let spec = spec();

    let first = ensure_embed(&host, &spec).expect("first embed");
    assert!(first.player_mounted);
    let second = ensure_embed(&host, &spec).expect("second embed");
    assert!(!second.changed());

    let doc = dom::document().expect("document");
    let players = doc
        .query_selector_all(&format!("#{}", spec.player_id))
        .expect("query players");
    assert_eq!(players.length(), 1);
    assert!(host.has_script(&spec.script_src));
}

#[wasm_bindgen_test]
fn missing_container_is_an_error() {
    let host = DomEmbedHost::new();
    let spec = EmbedSpec {
        container_selector: "#nowhere .vsl-placeholder".to_string(),
        player_id: "vid-orphan".to_string(),
        ..spec()
    };
    assert!(host.mount_player(&spec).is_err());
}

#[wasm_bindgen_test]
fn load_error_hook_is_optional() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let host = DomEmbedHost::new().on_load_error(move |err| sink.borrow_mut().push(err.to_string()));
    host.append_script("https://127.0.0.1:9/missing.js")
        .expect("script appended");
    assert!(host.has_script("https://127.0.0.1:9/missing.js"));
    // The error event fires asynchronously, after append returns.
    assert!(seen.borrow().is_empty());
}
