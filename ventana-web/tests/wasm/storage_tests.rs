use wasm_bindgen_test::*;

use ventana_core::{AnswerField, KeyValueStorage, QuizAnswers, capture_entry_attribution};
use ventana_web::storage::BrowserStorage;

fn clear() {
    ventana_web::dom::local_storage()
        .expect("localStorage")
        .clear()
        .expect("clear storage");
}

#[wasm_bindgen_test]
fn raw_items_round_trip() {
    clear();
    let storage = BrowserStorage;
    assert_eq!(storage.get_item("sample").expect("read"), None);
    storage.set_item("sample", "1").expect("write");
    assert_eq!(storage.get_item("sample").expect("read").as_deref(), Some("1"));
}

#[wasm_bindgen_test]
fn quiz_answers_survive_a_new_handle() {
    clear();
    let mut answers = QuizAnswers::default();
    answers.set(AnswerField::Gender, "MUJER");
    BrowserStorage::store().save_quiz_answers(&answers);
    assert_eq!(BrowserStorage::store().quiz_answers(), answers);
}

#[wasm_bindgen_test]
fn entry_attribution_is_persisted() {
    clear();
    let store = BrowserStorage::store();
    capture_entry_attribution(&store, "?utm_source=facebook&fbclid=abc");
    let attribution = store.attribution();
    assert!(!attribution.is_empty());
}
