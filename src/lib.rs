pub mod config;
pub mod css;
pub mod document;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod mapping;
pub mod parser;
pub mod rewrite;
pub mod tag;
pub mod token;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use css::convert_to_css;
pub use extract::{Extraction, StyleSource};
pub use mapping::StyleMapping;

/// Extract the inline style declared in `text`.
///
/// Recognizes `style={{ ... }}`, `style="..."`, or a bare object literal /
/// member list. Absence and parse failures are reported separately.
pub fn extract(text: &str) -> Extraction {
    StyleSource::detect(text).parse()
}

/// Parse the inline style declared in `text` into a property mapping.
///
/// Never fails: text without a usable declaration yields an empty mapping.
pub fn parse_inline_styles(text: &str) -> StyleMapping {
    extract(text).into_mapping()
}
