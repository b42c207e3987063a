#![cfg(target_arch = "wasm32")]

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

mod app_tests;
mod dom_tests;
mod driver_tests;
mod embed_tests;
mod storage_tests;
