use crate::mapping::StyleMapping;

/// Convert a camelCase property name to CSS kebab-case.
///
/// Every ASCII uppercase letter becomes `-` plus its lowercase form, so a
/// leading capital yields a leading hyphen (`WebkitTransform` →
/// `-webkit-transform`, `Color` → `-color`).
pub fn camel_to_kebab(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Render a mapping as CSS declarations, one `property: value;` per line.
pub fn convert_to_css(mapping: &StyleMapping) -> String {
    mapping
        .iter()
        .map(|(property, value)| format!("{}: {value};", camel_to_kebab(property)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap declarations in a rule block, `.class { ... }` or an anonymous `{ ... }`.
pub fn css_rule(class_name: Option<&str>, css: &str) -> String {
    match class_name {
        Some(name) => format!(".{name} {{\n{css}\n}}"),
        None => format!("{{\n{css}\n}}"),
    }
}
