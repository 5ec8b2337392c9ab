//! CSS declaration text for prop-bag style objects

use serde_json::{Map, Value};

/// Render a style object as the text of a `style` attribute.
///
/// camelCase property names are hyphenated, custom properties are kept
/// verbatim, and `null` or boolean values are skipped.
pub fn style_to_css(style: &Map<String, Value>) -> String {
    style
        .iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Null | Value::Bool(_) => return None,
                Value::Array(_) | Value::Object(_) => value.to_string(),
            };
            Some(format!("{}:{}", css_property_name(name), value))
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Map a style prop name to its CSS property name
pub fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}
