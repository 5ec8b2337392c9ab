//! Tests for the core style value model and block type descriptors
//!
//! These tests show how a block's `style` attribute is read into a typed
//! configuration tree and how descriptors declare attributes and supports.

#[cfg(test)]
mod core_tests {
    use serde_json::json;

    use crate::core::{
        AttributeDeclaration, AttributeType, BlockTypeDescriptor, Declarations, ScalarValue,
        StyleConfig, StyleValue,
    };

    /// Test reading a style attribute from instance attributes
    ///
    /// Objects become nodes and everything else becomes a leaf.
    #[test]
    fn test_style_config_from_attribute() {
        let attributes = json!({
            "style": {
                "color": { "text": "#000", "background": null },
                "typography": { "lineHeight": 1.5 }
            }
        });

        let config = StyleConfig::from_attribute(attributes.get("style"));
        assert_eq!(config.len(), 2);
        assert_eq!(
            config.get_path(&["color", "text"]),
            Some(&StyleValue::Leaf(ScalarValue::from("#000")))
        );
        assert_eq!(
            config.get_path(&["color", "background"]),
            Some(&StyleValue::Leaf(ScalarValue::Null))
        );
        assert_eq!(
            config.get_path(&["typography", "lineHeight"]),
            Some(&StyleValue::Leaf(ScalarValue::Number(1.5)))
        );
    }

    /// Test StyleConfig serialization
    ///
    /// A configuration serializes back to the JSON it was read from, keys
    /// in their original order.
    #[test]
    fn test_style_config_serialization() {
        let source = r##"{"typography":{"lineHeight":"2"},"color":{"text":"#fff"}}"##;
        let config: StyleConfig = serde_json::from_str(source).expect("Failed to parse style");
        let json = serde_json::to_string(&config).expect("Failed to serialize style");
        assert_eq!(json, source);
    }

    /// Test integer and float scalars
    #[test]
    fn test_numeric_scalars() {
        let config: StyleConfig = serde_json::from_str(r#"{ "a": 3, "b": 3.25, "c": -1 }"#).unwrap();
        assert_eq!(config.get("a"), Some(&StyleValue::from(3i64)));
        assert_eq!(config.get("b"), Some(&StyleValue::from(3.25)));
        assert_eq!(config.get("c"), Some(&StyleValue::from(-1i64)));
        assert_eq!(ScalarValue::Integer(3).as_number(), Some(3.0));
    }

    /// Test converting scalars back to JSON
    #[test]
    fn test_scalar_to_json() {
        assert_eq!(ScalarValue::from("x").to_json(), json!("x"));
        assert_eq!(ScalarValue::Integer(7).to_json(), json!(7));
        assert_eq!(ScalarValue::Number(0.5).to_json(), json!(0.5));
        assert_eq!(ScalarValue::Number(f64::NAN).to_json(), json!(null));
        assert_eq!(ScalarValue::Boolean(false).to_json(), json!(false));
        assert_eq!(ScalarValue::Null.to_json(), json!(null));
    }

    /// Test Declarations renaming
    ///
    /// Renaming keeps order and values.
    #[test]
    fn test_declarations_map_names() {
        let mut decls = Declarations::new();
        decls.insert("a", ScalarValue::from("1"));
        decls.insert("b", ScalarValue::from("2"));

        let renamed = decls.map_names(|name| format!("--x--{}", name));
        let names: Vec<_> = renamed.names().collect();
        assert_eq!(names, vec!["--x--a", "--x--b"]);
        assert_eq!(renamed.get("--x--b"), Some(&ScalarValue::from("2")));
    }

    /// Test BlockTypeDescriptor builder
    ///
    /// Descriptors are plain owned values built up with `with_*` methods.
    #[test]
    fn test_descriptor_builder() {
        let block = BlockTypeDescriptor::new("core/paragraph")
            .with_title("Paragraph")
            .with_category("text")
            .with_attribute("content", AttributeDeclaration::new(AttributeType::String))
            .with_attribute(
                "dropCap",
                AttributeDeclaration::new(AttributeType::Boolean).with_default(false),
            )
            .with_support("__experimentalColor", true);

        assert_eq!(block.name, "core/paragraph");
        assert_eq!(block.title, "Paragraph");
        assert_eq!(block.category, "text");
        assert_eq!(block.attributes.len(), 2);
        assert_eq!(block.attributes["dropCap"].default, Some(json!(false)));
        assert!(block.has_support("__experimentalColor", false));
    }

    /// Test descriptor serialization skips the callback
    #[test]
    fn test_descriptor_serialization() {
        let block = BlockTypeDescriptor::new("core/paragraph")
            .with_attribute("style", AttributeDeclaration::new(AttributeType::Object))
            .with_edit_wrapper_props(|_| Default::default());

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["attributes"]["style"], json!({ "type": "object" }));
        assert!(json.get("edit_wrapper_props").is_none());

        let back: BlockTypeDescriptor = serde_json::from_value(json).unwrap();
        assert!(back.edit_wrapper_props.is_none());
        assert_eq!(back.attributes["style"].attr_type, AttributeType::Object);
    }
}
