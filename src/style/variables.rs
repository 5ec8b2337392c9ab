//! CSS custom property flattening
//!
//! Nested style configuration becomes a flat list of `--wp--` prefixed
//! custom properties, one per leaf, with every path segment kebab-cased.

use crate::core::value::{Declarations, StyleConfig, StyleValue};

/// Prefix of every generated custom property
pub const VARIABLE_PREFIX: &str = "--wp";

/// Separator between path segments
pub const VARIABLE_SEPARATOR: &str = "--";

/// Flatten a style configuration into CSS custom properties
///
/// # Example
/// ```
/// use block_style::core::StyleConfig;
/// use block_style::style::variables::get_css_variables;
///
/// let styles = StyleConfig::new().with("typography", StyleConfig::new().with("lineHeight", "2"));
/// let vars = get_css_variables(&styles);
/// assert_eq!(vars.get("--wp--typography--line-height").and_then(|v| v.as_string()), Some("2"));
/// ```
pub fn get_css_variables(styles: &StyleConfig) -> Declarations {
    flatten(styles).map_names(|key| format!("{}{}{}", VARIABLE_PREFIX, VARIABLE_SEPARATOR, key))
}

fn flatten(config: &StyleConfig) -> Declarations {
    let mut result = Declarations::new();
    for (key, value) in config.iter() {
        let key = kebab_case(key);
        match value {
            StyleValue::Leaf(scalar) => result.insert(key, scalar.clone()),
            StyleValue::Node(child) => {
                for (sub_key, scalar) in flatten(child) {
                    result.insert(format!("{}{}{}", key, VARIABLE_SEPARATOR, sub_key), scalar);
                }
            }
        }
    }
    result
}

/// Convert an identifier to kebab-case.
///
/// Apostrophes are dropped first (`don't` -> `dont`). Words then break at
/// non-alphanumeric characters, at lower-to-upper case changes, between
/// letters and digits, and before the last capital of an acronym that runs
/// into a capitalized word (`XMLHttp` -> `xml-http`). English ordinals stay
/// whole (`4th`, `21st`) when followed by a word boundary. Accented letters
/// are kept as-is rather than deburred.
pub fn kebab_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().filter(|c| !matches!(c, '\'' | '\u{2019}')).collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            i += 1;
            continue;
        }

        if c.is_ascii_digit() && (i == 0 || !chars[i - 1].is_ascii_digit()) {
            if let Some(end) = ordinal_end(&chars, i) {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                words.push(chars[i..end].iter().flat_map(|c| c.to_lowercase()).collect());
                i = end;
                continue;
            }
        }

        if !current.is_empty() {
            // current is non-empty, so the previous char is alphanumeric
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() != c.is_alphabetic())
                || (prev.is_uppercase() && c.is_uppercase() && next.map_or(false, char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
        i += 1;
    }

    if !current.is_empty() {
        words.push(current);
    }
    words.join("-")
}

/// End index of an ordinal starting at the digit run at `start`
fn ordinal_end(chars: &[char], start: usize) -> Option<usize> {
    let digits_end = chars[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |n| start + n);
    let suffix = match chars[digits_end - 1] {
        '1' => "st",
        '2' => "nd",
        '3' => "rd",
        _ => "th",
    };
    let found: String = chars.get(digits_end..digits_end + 2)?.iter().collect();
    let next = chars.get(digits_end + 2).copied();
    let at_boundary = |other_case: fn(&char) -> bool| {
        next.map_or(true, |n| !n.is_ascii_alphanumeric() || other_case(&n))
    };

    if found == suffix && at_boundary(char::is_ascii_uppercase) {
        Some(digits_end + 2)
    } else if found == suffix.to_ascii_uppercase() && at_boundary(char::is_ascii_lowercase) {
        Some(digits_end + 2)
    } else {
        None
    }
}
