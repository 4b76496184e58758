//! Browser interop tests for the report viewer.
//!
//! Run:
//!   wasm-pack test --headless --firefox report-ui

#![cfg(target_arch = "wasm32")]

use report_ui::{element_rect, encode_path_segment, read_global_json, take_global_json};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn set_global(name: &str, json: &str) {
    let value = js_sys::JSON::parse(json).unwrap();
    js_sys::Reflect::set(&js_sys::global(), &JsValue::from_str(name), &value).unwrap();
}

// ─── Globals ─────────────────────────────────────────────────────────────────

#[wasm_bindgen_test]
fn reads_global_as_json_text() {
    set_global("reportViewerTestGlobal", r#"{"name": "Door_Lock", "lines": []}"#);
    let text = read_global_json("reportViewerTestGlobal").unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["name"], "Door_Lock");
}

#[wasm_bindgen_test]
fn take_clears_the_global() {
    set_global("reportViewerTakenGlobal", r#"{"name": "A"}"#);
    assert!(take_global_json("reportViewerTakenGlobal").is_some());
    assert_eq!(read_global_json("reportViewerTakenGlobal"), None);
}

#[wasm_bindgen_test]
fn missing_global_is_none() {
    assert_eq!(read_global_json("reportViewerNoSuchGlobal"), None);
}

// ─── URLs and layout ─────────────────────────────────────────────────────────

#[wasm_bindgen_test]
fn test_names_are_path_encoded() {
    assert_eq!(encode_path_segment("Door Lock/2"), "Door%20Lock%2F2");
    assert_eq!(encode_path_segment("Wiper_Test"), "Wiper_Test");
}

#[wasm_bindgen_test]
fn unknown_element_has_no_rect() {
    assert_eq!(element_rect("report-chart-missing"), None);
}
