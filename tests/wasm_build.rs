//! WASM build test
//!
//! Exercises the JavaScript-facing class in a browser.

#![cfg(target_arch = "wasm32")]

use layer_elevation_wasm::api::JsElevationProperties;
use layer_elevation_wasm::{AltitudeBinding, AltitudeClamping};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn props_object(pairs: &[(&str, &str)]) -> js_sys::Object {
    let object = js_sys::Object::new();
    for (key, value) in pairs {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), &JsValue::from_str(value)).unwrap();
    }
    object
}

#[wasm_bindgen_test]
fn test_defaults() {
    let props = JsElevationProperties::new();
    assert_eq!(props.z_scale(), 1.0);
    assert!(!props.has_elevation());
    assert_eq!(props.clamping(), AltitudeClamping::Terrain);
    assert_eq!(props.binding(), AltitudeBinding::Centroid);
}

#[wasm_bindgen_test]
fn test_symbol_from_js_object() {
    let mut props = JsElevationProperties::new();
    props
        .set_profile_line_symbol(&props_object(&[("outline_color", "#ff4433"), ("outline_width", "0.5")]))
        .unwrap();
    assert_eq!(props.profile_line_symbol_color(), "#ff4433");
}

#[wasm_bindgen_test]
fn test_xml_round_trip() {
    let mut props = JsElevationProperties::new();
    props.set_z_scale(2.0);
    props.set_clamping(AltitudeClamping::Absolute);
    props.set_extrusion_enabled(true);
    props
        .set_profile_fill_symbol(&props_object(&[("color", "#ff4455")]))
        .unwrap();

    let xml = props.write_xml().unwrap();
    let mut restored = JsElevationProperties::new();
    restored.read_xml(&xml).unwrap();

    assert_eq!(restored.properties(), props.properties());
    assert_eq!(restored.profile_fill_symbol_color(), "#ff4455");
}

#[wasm_bindgen_test]
fn test_read_invalid_xml_is_an_error() {
    let mut props = JsElevationProperties::new();
    assert!(props.read_xml("<maplayer>").is_err());
}

#[wasm_bindgen_test]
fn test_json_round_trip() {
    let mut props = JsElevationProperties::new();
    props.set_z_offset(4.0);
    props.set_binding(AltitudeBinding::Vertex);

    let json = props.to_json().unwrap();
    let restored = JsElevationProperties::from_json(json).unwrap();
    assert_eq!(restored.properties(), props.properties());
}

#[wasm_bindgen_test]
fn test_js_error_keeps_message() {
    let err = layer_elevation_wasm::api::helpers::js_error("Elevation XML import error: boom");
    assert_eq!(err.as_string().as_deref(), Some("Elevation XML import error: boom"));
}
