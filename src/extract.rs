use std::sync::LazyLock;

use regex::Regex;

use crate::error::StyleError;
use crate::mapping::StyleMapping;
use crate::parser;

static JSX_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)style\s*=\s*\{\{(.*?)\}\}").unwrap());
static HTML_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style\s*=\s*["']([^"']*)["']"#).unwrap());

/// Text identified as holding a style declaration, tagged by its syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSource<'a> {
    /// Content of a quoted `style="prop: value; ..."` attribute.
    HtmlAttribute(&'a str),
    /// Object literal text, e.g. the inside of `style={{ ... }}`.
    JsxObject(&'a str),
    /// No declaration syntax found; the caller passed the style itself.
    Bare(&'a str),
}

/// Outcome of an extraction attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Nothing in the input looked like a style declaration.
    Absent,
    /// A declaration was found but its object literal did not parse.
    Malformed(StyleError),
    Parsed(StyleMapping),
}

impl Extraction {
    /// Collapse to a mapping, treating absent and malformed as empty.
    pub fn into_mapping(self) -> StyleMapping {
        match self {
            Extraction::Parsed(mapping) => mapping,
            Extraction::Absent | Extraction::Malformed(_) => StyleMapping::new(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Extraction::Absent => "absent",
            Extraction::Malformed(_) => "malformed",
            Extraction::Parsed(_) => "parsed",
        }
    }
}

impl<'a> StyleSource<'a> {
    /// Locate a style declaration in arbitrary text.
    ///
    /// A JSX `style={{ ... }}` wins over an HTML `style="..."`; without
    /// either, the whole trimmed input is taken as the declaration.
    pub fn detect(input: &'a str) -> Self {
        let input = input.trim();

        if let Some(inner) = JSX_STYLE.captures(input).and_then(|c| c.get(1)) {
            tracing::debug!("detected JSX style object");
            return StyleSource::JsxObject(inner.as_str());
        }
        if let Some(inner) = HTML_STYLE.captures(input).and_then(|c| c.get(1)) {
            tracing::debug!("detected HTML style attribute");
            return StyleSource::HtmlAttribute(inner.as_str());
        }

        tracing::debug!("no style attribute, parsing input as a bare style object");
        StyleSource::Bare(input)
    }

    pub fn text(&self) -> &'a str {
        match self {
            StyleSource::HtmlAttribute(text)
            | StyleSource::JsxObject(text)
            | StyleSource::Bare(text) => text,
        }
    }

    /// Parse the declaration into a mapping.
    pub fn parse(&self) -> Extraction {
        match *self {
            StyleSource::HtmlAttribute(text) => Extraction::Parsed(parse_html_attribute(text)),
            StyleSource::JsxObject(text) => match parser::parse_object_literal(text) {
                Ok(mapping) => Extraction::Parsed(mapping),
                Err(err) => {
                    tracing::debug!(error = %err, "style object did not parse");
                    Extraction::Malformed(err)
                }
            },
            StyleSource::Bare(text) => {
                if text.is_empty() {
                    return Extraction::Absent;
                }
                match parser::parse_object_literal(text) {
                    Ok(mapping) => Extraction::Parsed(mapping),
                    // Only text that opens like an object counts as a broken declaration.
                    Err(err) if text.starts_with('{') => Extraction::Malformed(err),
                    Err(_) => Extraction::Absent,
                }
            }
        }
    }
}

/// Parse `prop: value; prop: value` pairs. Later duplicates overwrite.
pub fn parse_html_attribute(content: &str) -> StyleMapping {
    let mut mapping = StyleMapping::new();
    for segment in content.split(';') {
        let Some((property, value)) = segment.split_once(':') else {
            continue;
        };
        let (property, value) = (property.trim(), value.trim());
        if !property.is_empty() && !value.is_empty() {
            mapping.insert(property, value);
        }
    }
    mapping
}

/// Strip redundant outer braces: `{{ color: 'red' }}` → `{ color: 'red' }`.
pub fn unwrap_nested_braces(text: &str) -> &str {
    let mut text = text.trim();
    while let Some(inner) = text.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
        let inner = inner.trim();
        if inner.starts_with('{') && inner.ends_with('}') {
            text = inner;
        } else {
            break;
        }
    }
    text
}
