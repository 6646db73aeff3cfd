//! WASM bindings for the json2css encoder.
//!
//! Exposes `encode()` to JavaScript via wasm-bindgen. Input is either JSON
//! text or an already-parsed JS object; output is the CSS string.
//!
//! Both entry points go through the JSON text decoder, so serde_json's
//! recursion limit applies to every input.

use json2css_encoder::Encoder;
use json2css_tree::{Decoder, Registry};
use wasm_bindgen::prelude::*;

/// Encode a JSON stylesheet document to CSS.
///
/// Throws a JS error if decoding or encoding fails.
#[wasm_bindgen]
pub fn encode(json: &str) -> Result<String, JsError> {
    encode_json(json).map_err(|e| JsError::new(&e))
}

/// Encode a stylesheet given as a plain JS array of statement objects.
///
/// The value is stringified first; cyclic values throw here instead of
/// recursing.
#[wasm_bindgen(js_name = encodeValue)]
pub fn encode_value(tree: JsValue) -> Result<String, JsError> {
    let json = js_sys::JSON::stringify(&tree)
        .map_err(|_| JsError::new("stylesheet value cannot be converted to JSON"))?;
    encode(&String::from(json))
}

fn encode_json(json: &str) -> Result<String, String> {
    let registry = Registry::standard();
    let statements = Decoder::new(&registry)
        .decode_str(json)
        .map_err(|e| e.to_string())?;
    Encoder::new(registry)
        .encode_to_string(&statements)
        .map_err(|e| e.to_string())
}

/// The at-rule types the encoder accepts, e.g. `["charset", "font-face", ...]`.
#[wasm_bindgen(js_name = atRuleTypes)]
pub fn at_rule_types() -> js_sys::Array {
    Registry::standard().tags().map(JsValue::from).collect()
}

/// Get the encoder version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
