//! WASM bindings for the inline style extractor.
//!
//! Exposes parsing and conversion to JavaScript via wasm-bindgen so an
//! editor extension can call the engine directly.
//! Build with: `wasm-pack build --target web --features wasm`

use wasm_bindgen::prelude::*;

/// Convert the inline style declared in `text` to CSS declarations.
///
/// Returns an empty string when no usable style is found.
#[wasm_bindgen]
pub fn convert_inline_styles(text: &str) -> String {
    crate::convert_to_css(&crate::parse_inline_styles(text))
}

/// Parse the inline style declared in `text` into a JSON object string.
///
/// Key order follows the declaration. Text without a usable style yields
/// `{}`.
#[wasm_bindgen]
pub fn parse_inline_styles_json(text: &str) -> String {
    let mapping = crate::parse_inline_styles(text);
    // string keys and values always serialize
    serde_json::to_string(&mapping).unwrap_or_else(|_| "{}".to_string())
}

/// Classify `text` as `"absent"`, `"malformed"` or `"parsed"`.
#[wasm_bindgen]
pub fn extraction_status(text: &str) -> String {
    crate::extract(text).status().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keeps_declaration_order() {
        assert_eq!(
            parse_inline_styles_json("style={{ zIndex: 2, color: 'red' }}"),
            r#"{"zIndex":"2","color":"red"}"#
        );
        assert_eq!(parse_inline_styles_json("<div>"), "{}");
        assert_eq!(parse_inline_styles_json("style={{ width: size }}"), "{}");
    }

    #[test]
    fn status_and_conversion() {
        assert_eq!(extraction_status("style={{ width: size }}"), "malformed");
        assert_eq!(convert_inline_styles(r#"style="color: red""#), "color: red;");
    }
}
