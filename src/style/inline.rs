//! Inline style extraction

use crate::core::value::{Declarations, StyleConfig, StyleValue};

/// Inline style properties and the style paths they are read from, in
/// output order
pub const INLINE_STYLE_MAPPINGS: [(&str, &[&str]); 3] = [
    ("lineHeight", &["typography", "lineHeight"]),
    ("backgroundColor", &["color", "background"]),
    ("color", &["color", "text"]),
];

/// Extract the inline style properties present in a style configuration.
///
/// Paths that do not resolve are omitted. A path that resolves to a nested
/// object has no scalar to copy and is omitted as well.
pub fn get_inline_styles(styles: &StyleConfig) -> Declarations {
    let mut output = Declarations::new();
    for (property, path) in INLINE_STYLE_MAPPINGS {
        match styles.get_path(path) {
            Some(StyleValue::Leaf(value)) => output.insert(property, value.clone()),
            Some(StyleValue::Node(_)) => {
                tracing::trace!(property, "skipping nested value for inline style");
            }
            None => {}
        }
    }
    output
}
