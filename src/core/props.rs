//! Render prop bags
//!
//! Props flow through the extension filters on their way to the rendered
//! element. Keys keep insertion order so serialized output is stable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the style sub-object inside a prop bag
pub const STYLE_PROP: &str = "style";

/// Owned, mutable prop bag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderProps(Map<String, Value>);

impl RenderProps {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a prop, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder form of [`RenderProps::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a prop, shifting later props down to keep their order
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `style` sub-object, if present and an object
    pub fn style(&self) -> Option<&Map<String, Value>> {
        self.0.get(STYLE_PROP).and_then(Value::as_object)
    }

    /// Replace the `style` sub-object
    pub fn set_style(&mut self, style: Map<String, Value>) {
        self.0.insert(STYLE_PROP.to_string(), Value::Object(style));
    }

    /// Take the raw `style` value, leaving `null` in its slot so a later
    /// [`RenderProps::set_style`] keeps the key's position
    pub fn take_style(&mut self) -> Option<Value> {
        self.0.get_mut(STYLE_PROP).map(Value::take)
    }

    /// Render the `style` sub-object as CSS declaration text
    pub fn style_attribute(&self) -> Option<String> {
        self.style().map(crate::style::css::style_to_css)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RenderProps {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
