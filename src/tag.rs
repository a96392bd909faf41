//! Locating tags in a document and rewriting their attributes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::ClassAttribute;
use crate::document::{Position, Span, TextSource};
use crate::extract::{unwrap_nested_braces, StyleSource};

static STYLE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)style\s*=\s*(\{\{.*?\}\}|\{.*?\}|["'][^"']*["'])"#).unwrap()
});
static CLASS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class(Name)?\s*=\s*["']([^"']*)["']"#).unwrap());
static TAG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([a-zA-Z0-9]+)").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// A `style=...` attribute found inside a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDeclaration<'a> {
    /// The whole attribute text, `style=` included.
    pub matched: &'a str,
    pub source: StyleSource<'a>,
}

/// Find the lines making up the tag around `line`.
///
/// Scans backward for a line containing `<` and forward for one containing
/// `>`. The span covers those lines completely.
pub fn find_tag_range<D: TextSource + ?Sized>(doc: &D, line: usize) -> Option<Span> {
    let count = doc.line_count();
    if line >= count {
        return None;
    }

    let mut start = line;
    while start > 0 && !doc.line(start)?.contains('<') {
        start -= 1;
    }
    let mut end = line;
    while end + 1 < count && !doc.line(end)?.contains('>') {
        end += 1;
    }

    let end_line = doc.line(end)?;
    if !doc.line(start)?.contains('<') || !end_line.contains('>') {
        return None;
    }

    Some(Span {
        start: Position::new(start, 0),
        end: Position::new(end, end_line.chars().count()),
    })
}

/// Locate the first style attribute in `tag_text` and classify its value.
pub fn find_style_declaration(tag_text: &str) -> Option<StyleDeclaration<'_>> {
    let caps = STYLE_DECLARATION.captures(tag_text)?;
    let matched = caps.get(0)?.as_str();
    let value = caps.get(1)?.as_str().trim();

    let source = if value.starts_with(['"', '\'']) {
        StyleSource::HtmlAttribute(value[1..value.len() - 1].trim())
    } else {
        StyleSource::JsxObject(unwrap_nested_braces(value))
    };

    Some(StyleDeclaration { matched, source })
}

/// Delete the declaration text from the tag.
pub fn remove_declaration(tag_text: &str, matched: &str, collapse_whitespace: bool) -> String {
    let removed = tag_text.replacen(matched, "", 1);
    if collapse_whitespace {
        WHITESPACE_RUN.replace_all(&removed, " ").into_owned()
    } else {
        removed
    }
}

/// First class token of an existing `class`/`className` attribute.
pub fn existing_class_name(tag_text: &str) -> Option<&str> {
    CLASS_ATTR
        .captures(tag_text)
        .and_then(|caps| caps.get(2))
        .and_then(|value| value.as_str().split_whitespace().next())
}

/// Set the tag's class to `name`.
///
/// An existing `class`/`className` attribute is replaced in place, keeping
/// its attribute name and dropping any other classes. Otherwise `attribute`
/// is inserted after the tag name.
pub fn apply_class_name(tag_text: &str, name: &str, attribute: ClassAttribute) -> String {
    if CLASS_ATTR.is_match(tag_text) {
        return CLASS_ATTR
            .replacen(tag_text, 1, |caps: &Captures| {
                let suffix = caps.get(1).map_or("", |m| m.as_str());
                format!("class{suffix}=\"{name}\"")
            })
            .into_owned();
    }

    TAG_OPEN
        .replacen(tag_text, 1, |caps: &Captures| {
            format!("<{} {}=\"{name}\"", &caps[1], attribute.as_str())
        })
        .into_owned()
}

/// Whether the tag carries a style worth offering an extraction for.
pub fn has_inline_style(tag_text: &str) -> bool {
    static QUOTED: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"style\s*=\s*["'][^"']+["']"#).unwrap());
    static DOUBLE_BRACE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)style\s*=\s*\{\{.*?\}\}").unwrap());

    QUOTED.is_match(tag_text) || DOUBLE_BRACE.is_match(tag_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_range_single_line() {
        let doc = Document::new("<p>\n  <div style=\"color: red\">hi</div>\n</p>");
        let span = find_tag_range(&doc, 1).unwrap();
        assert_eq!(span.start, Position::new(1, 0));
        assert_eq!(span.end, Position::new(1, 34));
    }

    #[test]
    fn tag_range_multi_line() {
        let source = "<div\n  className=\"box\"\n  style={{ color: 'red' }}\n>\n</div>";
        let doc = Document::new(source);
        let span = find_tag_range(&doc, 2).unwrap();
        assert_eq!(span.start, Position::new(0, 0));
        assert_eq!(span.end, Position::new(3, 1));
    }

    #[test]
    fn tag_range_not_found() {
        let doc = Document::new("plain text\nno markup");
        assert_eq!(find_tag_range(&doc, 1), None);
        assert_eq!(find_tag_range(&doc, 7), None);
        assert_eq!(find_tag_range(&Document::new(""), 0), None);
    }

    #[test]
    fn declaration_html_form() {
        let decl = find_style_declaration(r#"<div style=" color: red; " id="a">"#).unwrap();
        assert_eq!(decl.matched, r#"style=" color: red; ""#);
        assert_eq!(decl.source, StyleSource::HtmlAttribute("color: red;"));
    }

    #[test]
    fn declaration_jsx_double_brace() {
        let decl = find_style_declaration("<div style={{ color: 'red' }}>").unwrap();
        assert_eq!(decl.matched, "style={{ color: 'red' }}");
        assert_eq!(decl.source, StyleSource::JsxObject("{ color: 'red' }"));
    }

    #[test]
    fn declaration_jsx_single_brace() {
        let decl = find_style_declaration("<div style={styles.box}>").unwrap();
        assert_eq!(decl.source, StyleSource::JsxObject("{styles.box}"));
    }

    #[test]
    fn declaration_missing() {
        assert_eq!(find_style_declaration("<div id=\"x\">"), None);
    }

    #[test]
    fn remove_collapses_whitespace() {
        let tag = r#"<div  id="a" style="color: red" >"#;
        let decl = find_style_declaration(tag).unwrap();
        assert_eq!(remove_declaration(tag, decl.matched, true), r#"<div id="a" >"#);
        assert_eq!(
            remove_declaration(tag, decl.matched, false),
            r#"<div  id="a"  >"#
        );
    }

    #[test]
    fn existing_class_takes_first_token() {
        assert_eq!(existing_class_name(r#"<a className="btn primary">"#), Some("btn"));
        assert_eq!(existing_class_name(r#"<a class='link'>"#), Some("link"));
        assert_eq!(existing_class_name(r#"<a class="">"#), None);
        assert_eq!(existing_class_name("<a>"), None);
    }

    #[test]
    fn apply_class_replaces_existing() {
        assert_eq!(
            apply_class_name(r#"<a className="btn primary" href="/">"#, "cta", ClassAttribute::Class),
            r#"<a className="cta" href="/">"#
        );
        assert_eq!(
            apply_class_name("<a class='x'>", "cta", ClassAttribute::ClassName),
            r#"<a class="cta">"#
        );
    }

    #[test]
    fn apply_class_inserts_after_tag_name() {
        assert_eq!(
            apply_class_name("<div id=\"a\">", "card", ClassAttribute::ClassName),
            r#"<div className="card" id="a">"#
        );
        assert_eq!(
            apply_class_name("<section>", "card", ClassAttribute::Class),
            r#"<section class="card">"#
        );
    }

    #[test]
    fn inline_style_detection() {
        assert!(has_inline_style(r#"<div style="color: red">"#));
        assert!(has_inline_style("<div style={{ color: 'red' }}>"));
        assert!(!has_inline_style(r#"<div style="">"#));
        assert!(!has_inline_style("<div style={styles}>"));
    }
}
