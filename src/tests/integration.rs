//! Integration tests: the style pipeline wired into the registries
//!
//! These tests simulate how an editor host uses the crate:
//!   StylePipeline → HookRegistry (filters)
//!                 → BlockTypeRegistry (registration, save props, edit props)

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::core::registry::{Filter, REGISTER_BLOCK_TYPE, SAVE_CONTENT_EXTRA_PROPS};
    use crate::core::{AttributeType, Attributes, BlockTypeDescriptor, HookRegistry, RenderProps};
    use crate::runtime::BlockTypeRegistry;
    use crate::style::support::{COLOR_SUPPORT_KEY, LINE_HEIGHT_SUPPORT_KEY};
    use crate::style::{GlobalStylesFlag, PipelineConfig, StylePipeline};

    fn attributes(value: Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    /// Helper: a registry with the style pipeline installed
    fn editor(flag: &GlobalStylesFlag) -> BlockTypeRegistry {
        let hooks = HookRegistry::new();
        StylePipeline::new(PipelineConfig::default(), flag.clone())
            .register(&hooks)
            .unwrap();
        BlockTypeRegistry::new(hooks)
    }

    // ====================================================================
    // Test 1: registration declares the style attribute and wraps props
    // ====================================================================

    #[test]
    fn test_registration_applies_style_filters() {
        let flag = GlobalStylesFlag::new(false);
        let registry = editor(&flag);

        let paragraph = registry
            .register_block_type(
                BlockTypeDescriptor::new("core/paragraph").with_support(COLOR_SUPPORT_KEY, true),
            )
            .unwrap();
        let separator = registry
            .register_block_type(BlockTypeDescriptor::new("core/separator"))
            .unwrap();

        assert_eq!(paragraph.attributes["style"].attr_type, AttributeType::Object);
        assert!(paragraph.edit_wrapper_props.is_some());
        assert!(separator.attributes.is_empty());
        assert!(separator.edit_wrapper_props.is_none());
    }

    // ====================================================================
    // Test 2: save props in both modes
    // ====================================================================

    #[test]
    fn test_save_props_follow_global_styles_mode() {
        let flag = GlobalStylesFlag::new(false);
        let registry = editor(&flag);
        registry
            .register_block_type(
                BlockTypeDescriptor::new("core/heading").with_support(LINE_HEIGHT_SUPPORT_KEY, true),
            )
            .unwrap();

        let attrs = attributes(json!({
            "content": "Hello",
            "style": { "typography": { "lineHeight": "1.1" }, "color": { "text": "#333" } }
        }));

        let inline = registry
            .get_save_props("core/heading", RenderProps::new(), &attrs)
            .unwrap();
        assert_eq!(inline.get("style"), Some(&json!({ "lineHeight": "1.1", "color": "#333" })));
        assert_eq!(inline.style_attribute().as_deref(), Some("line-height:1.1;color:#333"));

        flag.set(true);
        let vars = registry
            .get_save_props("core/heading", RenderProps::new(), &attrs)
            .unwrap();
        assert_eq!(
            vars.get("style"),
            Some(&json!({
                "--wp--typography--line-height": "1.1",
                "--wp--color--text": "#333"
            }))
        );
    }

    // ====================================================================
    // Test 3: third-party filters compose with the pipeline
    // ====================================================================

    #[test]
    fn test_third_party_filters_compose() {
        let flag = GlobalStylesFlag::new(false);
        let registry = editor(&flag);

        // Runs before the pipeline and sets an explicit color
        registry
            .hooks()
            .add_filter("acme/brand", 5, Filter::save_props(|mut props, _, _| {
                let mut style = props.style().cloned().unwrap_or_default();
                style.insert("color".into(), json!("rebeccapurple"));
                props.set_style(style);
                props
            }))
            .unwrap();

        // Runs after the pipeline and records what it saw
        registry
            .hooks()
            .add_filter("acme/audit", 20, Filter::save_props(|props, block, _| {
                let count = props.style().map_or(0, |s| s.len());
                props.with("data-style-count", count).with("data-block", block.name.clone())
            }))
            .unwrap();

        registry
            .register_block_type(BlockTypeDescriptor::new("core/quote").with_support(COLOR_SUPPORT_KEY, true))
            .unwrap();

        let attrs = attributes(json!({ "style": { "color": { "text": "red", "background": "white" } } }));
        let props = registry
            .get_save_props("core/quote", RenderProps::new(), &attrs)
            .unwrap();

        assert_eq!(
            props.get("style"),
            Some(&json!({ "backgroundColor": "white", "color": "rebeccapurple" }))
        );
        assert_eq!(props.get("data-style-count"), Some(&json!(2)));
        assert_eq!(props.get("data-block"), Some(&json!("core/quote")));
    }

    // ====================================================================
    // Test 4: edit-wrapper props of a registered block
    // ====================================================================

    #[test]
    fn test_edit_wrapper_props_after_registration() {
        let flag = GlobalStylesFlag::new(false);
        let registry = editor(&flag);

        // An extension registered after the pipeline wraps its callback
        registry
            .hooks()
            .add_filter("acme/align", 10, Filter::block_type(|block, _| {
                let previous = block.edit_wrapper_props.clone();
                block.with_edit_wrapper_props(move |attributes| {
                    let props = previous
                        .as_ref()
                        .map(|callback| callback.call(attributes))
                        .unwrap_or_default();
                    match attributes.get("align") {
                        Some(align) => props.with("data-align", align.clone()),
                        None => props,
                    }
                })
            }))
            .unwrap();

        registry
            .register_block_type(
                BlockTypeDescriptor::new("core/group")
                    .with_support(COLOR_SUPPORT_KEY, true)
                    .with_edit_wrapper_props(|_| RenderProps::new().with("data-type", "core/group")),
            )
            .unwrap();

        let attrs = attributes(json!({ "align": "full", "style": { "color": { "background": "#eee" } } }));
        let props = registry.get_edit_wrapper_props("core/group", &attrs).unwrap();

        assert_eq!(props.get("data-type"), Some(&json!("core/group")));
        assert_eq!(props.get("data-align"), Some(&json!("full")));
        assert_eq!(props.get("style"), Some(&json!({ "backgroundColor": "#eee" })));
    }

    // ====================================================================
    // Test 5: removing the pipeline's save filter
    // ====================================================================

    #[test]
    fn test_removing_save_filter_disables_injection() {
        let flag = GlobalStylesFlag::new(false);
        let registry = editor(&flag);
        registry
            .register_block_type(BlockTypeDescriptor::new("core/list").with_support(COLOR_SUPPORT_KEY, true))
            .unwrap();

        assert!(registry
            .hooks()
            .remove_filter(SAVE_CONTENT_EXTRA_PROPS, "core/style/addSaveProps")
            .unwrap());

        let attrs = attributes(json!({ "style": { "color": { "text": "red" } } }));
        let props = registry
            .get_save_props("core/list", RenderProps::new(), &attrs)
            .unwrap();
        assert!(props.is_empty());

        // Registration filters are still in place
        assert_eq!(registry.hooks().filter_count(REGISTER_BLOCK_TYPE).unwrap(), 2);
    }

    // ====================================================================
    // Test 6: a host-supplied style schema wins
    // ====================================================================

    #[test]
    fn test_declared_style_schema_is_kept() {
        let flag = GlobalStylesFlag::new(false);
        let registry = editor(&flag);

        let block: BlockTypeDescriptor = serde_json::from_value(json!({
            "name": "core/button",
            "attributes": {
                "style": { "type": "object", "default": { "color": { "text": "#fff" } } }
            },
            "supports": { "__experimentalColor": { "gradients": true } }
        }))
        .unwrap();

        let block = registry.register_block_type(block).unwrap();
        assert_eq!(
            block.attributes["style"].default,
            Some(json!({ "color": { "text": "#fff" } }))
        );
    }
}
