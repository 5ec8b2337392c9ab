//! Style values and configuration trees
//!
//! A block's `style` attribute is a nested JSON object. This module gives it a
//! typed shape: every node is either a scalar leaf or an ordered mapping of
//! further nodes, so traversal code matches on the variant instead of probing
//! the value at runtime.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Scalar leaf value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// String value
    String(String),
    /// Integer number
    Integer(i64),
    /// Unsigned integer above `i64::MAX`
    Unsigned(u64),
    /// Floating point number
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Null value
    Null,
}

impl ScalarValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Try to convert to string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => Some(*n),
            ScalarValue::Integer(i) => Some(*i as f64),
            ScalarValue::Unsigned(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Convert into a JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            ScalarValue::String(s) => Value::String(s.clone()),
            ScalarValue::Integer(i) => Value::from(*i),
            ScalarValue::Unsigned(u) => Value::from(*u),
            ScalarValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ScalarValue::Boolean(b) => Value::Bool(*b),
            ScalarValue::Null => Value::Null,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => f.write_str(s),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Unsigned(u) => write!(f, "{}", u),
            ScalarValue::Number(n) => write!(f, "{}", n),
            ScalarValue::Boolean(b) => write!(f, "{}", b),
            ScalarValue::Null => f.write_str("null"),
        }
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::Number(n)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<u64> for ScalarValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => ScalarValue::Integer(i),
            Err(_) => ScalarValue::Unsigned(u),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl From<&serde_json::Number> for ScalarValue {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            ScalarValue::Integer(i)
        } else if let Some(u) = n.as_u64() {
            ScalarValue::Unsigned(u)
        } else {
            ScalarValue::Number(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// A node in a style configuration tree
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Scalar leaf
    Leaf(ScalarValue),
    /// Nested configuration
    Node(StyleConfig),
}

impl StyleValue {
    /// Borrow the leaf scalar, if this is a leaf
    pub fn as_leaf(&self) -> Option<&ScalarValue> {
        match self {
            StyleValue::Leaf(v) => Some(v),
            StyleValue::Node(_) => None,
        }
    }

    /// Borrow the nested configuration, if this is a node
    pub fn as_node(&self) -> Option<&StyleConfig> {
        match self {
            StyleValue::Node(c) => Some(c),
            StyleValue::Leaf(_) => None,
        }
    }
}

macro_rules! leaf_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StyleValue {
                fn from(value: $t) -> Self {
                    StyleValue::Leaf(ScalarValue::from(value))
                }
            }
        )*
    };
}

leaf_from!(String, &str, f64, i64, u64, bool);

impl From<ScalarValue> for StyleValue {
    fn from(value: ScalarValue) -> Self {
        StyleValue::Leaf(value)
    }
}

impl From<StyleConfig> for StyleValue {
    fn from(config: StyleConfig) -> Self {
        StyleValue::Node(config)
    }
}

impl From<&Value> for StyleValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(map) => StyleValue::Node(StyleConfig::from(map)),
            Value::Array(items) => StyleValue::Node(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), StyleValue::from(v)))
                    .collect(),
            ),
            Value::String(s) => StyleValue::Leaf(ScalarValue::String(s.clone())),
            Value::Number(n) => StyleValue::Leaf(ScalarValue::from(n)),
            Value::Bool(b) => StyleValue::Leaf(ScalarValue::Boolean(*b)),
            Value::Null => StyleValue::Leaf(ScalarValue::Null),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Leaf(v) => v.serialize(serializer),
            StyleValue::Node(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StyleValueVisitor)
    }
}

struct StyleValueVisitor;

impl<'de> Visitor<'de> for StyleValueVisitor {
    type Value = StyleValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a style value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::Boolean(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::Integer(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::Number(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::String(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::String(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<StyleValue, E> {
        Ok(StyleValue::Leaf(ScalarValue::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<StyleValue, D::Error> {
        StyleValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StyleValue, A::Error> {
        let mut config = StyleConfig::new();
        let mut index = 0usize;
        while let Some(item) = seq.next_element::<StyleValue>()? {
            config.insert(index.to_string(), item);
            index += 1;
        }
        Ok(StyleValue::Node(config))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StyleValue, A::Error> {
        let mut config = StyleConfig::new();
        while let Some((key, value)) = map.next_entry::<String, StyleValue>()? {
            config.insert(key, value);
        }
        Ok(StyleValue::Node(config))
    }
}

/// Insertion-ordered entries with a key index
#[derive(Debug, Clone, PartialEq)]
struct Entries<V> {
    items: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> Entries<V> {
    fn insert(&mut self, key: String, value: V) {
        match self.index.get(&key) {
            Some(&i) => self.items[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.items.len());
                self.items.push((key, value));
            }
        }
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.items[i].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered style configuration
///
/// Keys keep their first insertion position; inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleConfig {
    entries: Entries<StyleValue>,
}

impl StyleConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`StyleConfig::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a direct child
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    /// Resolve a path of keys. Every intermediate segment must be a node.
    pub fn get_path(&self, path: &[&str]) -> Option<&StyleValue> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get(segment)?.as_node()?;
        }
        current.get(last)
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a block's `style` attribute.
    ///
    /// An absent attribute, or one that is not an object, yields the empty
    /// configuration.
    pub fn from_attribute(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => StyleConfig::from(map),
            Some(Value::Null) | None => StyleConfig::new(),
            Some(other) => {
                tracing::warn!(value = %other, "ignoring non-object style attribute");
                StyleConfig::new()
            }
        }
    }
}

impl From<&Map<String, Value>> for StyleConfig {
    fn from(map: &Map<String, Value>) -> Self {
        map.iter()
            .map(|(k, v)| (k.clone(), StyleValue::from(v)))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, StyleValue)> for StyleConfig {
    fn from_iter<I: IntoIterator<Item = (K, StyleValue)>>(iter: I) -> Self {
        let mut config = StyleConfig::new();
        for (k, v) in iter {
            config.insert(k, v);
        }
        config
    }
}

impl Serialize for StyleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in self.entries.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match StyleValue::deserialize(deserializer)? {
            StyleValue::Node(config) => Ok(config),
            StyleValue::Leaf(ScalarValue::Null) => Ok(StyleConfig::new()),
            StyleValue::Leaf(other) => Err(de::Error::invalid_type(
                de::Unexpected::Other(&format!("scalar {}", other)),
                &"a style object",
            )),
        }
    }
}

/// Ordered property declarations produced by the style pipeline
///
/// Used both for flattened CSS custom properties and for inline style
/// properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    entries: Entries<ScalarValue>,
}

impl Serialize for Declarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, replacing an existing value in place
    pub fn insert(&mut self, name: impl Into<String>, value: ScalarValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Property names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rename every entry, keeping order
    pub fn map_names(self, mut f: impl FnMut(&str) -> String) -> Self {
        let mut out = Declarations::new();
        for (k, v) in self.entries.items {
            out.insert(f(&k), v);
        }
        out
    }

    /// Convert into an insertion-ordered JSON object
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect()
    }
}

impl IntoIterator for Declarations {
    type Item = (String, ScalarValue);
    type IntoIter = std::vec::IntoIter<(String, ScalarValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.items.into_iter()
    }
}

/// JavaScript truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_order() {
        let value = json!({ "zeta": 1, "alpha": { "b": true, "a": null } });
        let config = match StyleValue::from(&value) {
            StyleValue::Node(c) => c,
            other => panic!("expected node, got {:?}", other),
        };

        let keys: Vec<_> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);

        let nested: Vec<_> = config.get("alpha").unwrap().as_node().unwrap().iter().map(|(k, _)| k).collect();
        assert_eq!(nested, vec!["b", "a"]);
    }

    #[test]
    fn test_arrays_become_indexed_nodes() {
        let config: StyleConfig = serde_json::from_value(json!({ "stops": ["red", "blue"] })).unwrap();
        let stops = config.get("stops").unwrap().as_node().unwrap();
        assert_eq!(stops.get("0"), Some(&StyleValue::from("red")));
        assert_eq!(stops.get("1"), Some(&StyleValue::from("blue")));
    }

    #[test]
    fn test_get_path_distinguishes_absent_from_falsy() {
        let config = StyleConfig::new().with("color", StyleConfig::new().with("text", ""));
        assert_eq!(config.get_path(&["color", "text"]), Some(&StyleValue::from("")));
        assert_eq!(config.get_path(&["color", "background"]), None);
        assert_eq!(config.get_path(&["color", "text", "deeper"]), None);
        assert_eq!(config.get_path(&[]), None);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut config = StyleConfig::new().with("a", 1i64).with("b", 2i64);
        config.insert("a", 3i64);
        let entries: Vec<_> = config.iter().collect();
        assert_eq!(entries[0], ("a", &StyleValue::from(3i64)));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_large_unsigned_integers_are_exact() {
        let config: StyleConfig = serde_json::from_value(json!({ "a": u64::MAX, "b": 7 })).unwrap();
        assert_eq!(config.get("a"), Some(&StyleValue::Leaf(ScalarValue::Unsigned(u64::MAX))));
        assert_eq!(config.get("b"), Some(&StyleValue::Leaf(ScalarValue::Integer(7))));

        let from_json = StyleValue::from(&json!(u64::MAX));
        assert_eq!(from_json, StyleValue::Leaf(ScalarValue::Unsigned(u64::MAX)));
        assert_eq!(ScalarValue::Unsigned(u64::MAX).to_json(), json!(u64::MAX));
        assert_eq!(ScalarValue::Unsigned(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_wide_config_keeps_order_and_lookup() {
        let config: StyleConfig = (0..500i64).map(|i| (format!("k{}", i), StyleValue::from(i))).collect();
        assert_eq!(config.len(), 500);
        assert_eq!(config.get("k499"), Some(&StyleValue::from(499i64)));
        assert_eq!(config.iter().next().map(|(k, _)| k), Some("k0"));

        let mut config = config;
        config.insert("k0", "replaced");
        assert_eq!(config.len(), 500);
        assert_eq!(config.iter().next(), Some(("k0", &StyleValue::from("replaced"))));
    }

    #[test]
    fn test_from_attribute_ignores_non_objects() {
        assert!(StyleConfig::from_attribute(None).is_empty());
        assert!(StyleConfig::from_attribute(Some(&json!(null))).is_empty());
        assert!(StyleConfig::from_attribute(Some(&json!("red"))).is_empty());
        assert_eq!(StyleConfig::from_attribute(Some(&json!({ "a": 1 }))).len(), 1);
    }

    #[test]
    fn test_scalar_config_is_rejected() {
        let result: Result<StyleConfig, _> = serde_json::from_value(json!(42));
        assert!(result.is_err());
    }

    #[test]
    fn test_declarations_serialize_in_order() {
        let mut decls = Declarations::new();
        decls.insert("lineHeight", ScalarValue::from("1.5"));
        decls.insert("color", ScalarValue::from("#000"));
        assert_eq!(
            serde_json::to_string(&decls).unwrap(),
            r##"{"lineHeight":"1.5","color":"#000"}"##
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }
}
