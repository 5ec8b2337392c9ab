//! Block type descriptors and related types
//!
//! A block type is a registered content-element definition: a name, its
//! attribute schema, the capabilities it supports, and an optional callback
//! computing the props of the wrapper element the editor renders around it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::props::RenderProps;
use super::value::is_truthy;

/// Attribute values of a single block instance
pub type Attributes = Map<String, Value>;

/// Attribute types a block can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// String attribute
    String,
    /// Floating point number
    Number,
    /// Integer number
    Integer,
    /// Boolean attribute
    Boolean,
    /// Opaque structured value
    Object,
    /// Array attribute
    Array,
    /// Null attribute
    Null,
}

/// Declaration of one block attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDeclaration {
    /// Declared type
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl AttributeDeclaration {
    /// Create a declaration with no default
    pub fn new(attr_type: AttributeType) -> Self {
        Self {
            attr_type,
            default: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Callback computing the edit-wrapper props of a block instance
#[derive(Clone)]
pub struct EditWrapperProps(Arc<dyn Fn(&Attributes) -> RenderProps + Send + Sync>);

impl EditWrapperProps {
    pub fn new(f: impl Fn(&Attributes) -> RenderProps + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Compute the props for the given attributes
    pub fn call(&self, attributes: &Attributes) -> RenderProps {
        (self.0)(attributes)
    }
}

impl fmt::Debug for EditWrapperProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EditWrapperProps(..)")
    }
}

/// Block type descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockTypeDescriptor {
    /// Namespaced block name, e.g. `core/paragraph`
    pub name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Inserter category
    #[serde(default)]
    pub category: String,
    /// Attribute declarations
    #[serde(default)]
    pub attributes: HashMap<String, AttributeDeclaration>,
    /// Capability flags
    #[serde(default)]
    pub supports: Map<String, Value>,
    /// Edit-wrapper props callback
    #[serde(skip)]
    pub edit_wrapper_props: Option<EditWrapperProps>,
}

impl BlockTypeDescriptor {
    /// Create a descriptor with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Declare an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, declaration: AttributeDeclaration) -> Self {
        self.attributes.insert(name.into(), declaration);
        self
    }

    /// Declare support for a capability
    pub fn with_support(mut self, feature: impl Into<String>, value: impl Into<Value>) -> Self {
        self.supports.insert(feature.into(), value.into());
        self
    }

    /// Install an edit-wrapper props callback
    pub fn with_edit_wrapper_props(
        mut self,
        f: impl Fn(&Attributes) -> RenderProps + Send + Sync + 'static,
    ) -> Self {
        self.edit_wrapper_props = Some(EditWrapperProps::new(f));
        self
    }

    /// Check whether the block type supports a capability.
    ///
    /// A present flag counts when it is truthy; an absent flag falls back
    /// to `default`.
    pub fn has_support(&self, feature: &str, default: bool) -> bool {
        has_block_support(&self.supports, feature, default)
    }

    /// Compute edit-wrapper props, or an empty bag without a callback
    pub fn edit_wrapper_props(&self, attributes: &Attributes) -> RenderProps {
        match &self.edit_wrapper_props {
            Some(callback) => callback.call(attributes),
            None => RenderProps::new(),
        }
    }
}

/// Capability lookup over a `supports` map
pub fn has_block_support(supports: &Map<String, Value>, feature: &str, default: bool) -> bool {
    supports.get(feature).map(is_truthy).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_support_truthiness() {
        let block = BlockTypeDescriptor::new("core/paragraph")
            .with_support("__experimentalColor", true)
            .with_support("align", json!(["wide", "full"]))
            .with_support("html", false)
            .with_support("anchor", json!(null));

        assert!(block.has_support("__experimentalColor", false));
        assert!(block.has_support("align", false));
        assert!(!block.has_support("html", true));
        assert!(!block.has_support("anchor", true));
        assert!(block.has_support("missing", true));
        assert!(!block.has_support("missing", false));
    }

    #[test]
    fn test_descriptor_from_json() {
        let block: BlockTypeDescriptor = serde_json::from_value(json!({
            "name": "core/heading",
            "title": "Heading",
            "attributes": {
                "level": { "type": "integer", "default": 2 },
                "content": { "type": "string" }
            },
            "supports": { "__experimentalLineHeight": true }
        }))
        .unwrap();

        assert_eq!(block.name, "core/heading");
        assert_eq!(block.attributes["level"].attr_type, AttributeType::Integer);
        assert_eq!(block.attributes["level"].default, Some(json!(2)));
        assert_eq!(block.attributes["content"].default, None);
        assert!(block.edit_wrapper_props.is_none());
        assert!(block.has_support("__experimentalLineHeight", false));
    }

    #[test]
    fn test_edit_wrapper_props_default_is_empty() {
        let block = BlockTypeDescriptor::new("core/quote");
        assert!(block.edit_wrapper_props(&Attributes::new()).is_empty());
    }

    #[test]
    fn test_edit_wrapper_props_callback() {
        let block = BlockTypeDescriptor::new("core/quote").with_edit_wrapper_props(|attributes| {
            let mut props = RenderProps::new();
            if let Some(align) = attributes.get("align") {
                props.insert("data-align", align.clone());
            }
            props
        });

        let mut attributes = Attributes::new();
        attributes.insert("align".into(), json!("wide"));
        let props = block.edit_wrapper_props(&attributes);
        assert_eq!(props.get("data-align"), Some(&json!("wide")));
    }
}
