//! Style attribute composition pipeline
//!
//! Blocks that support color or line height get a `style` attribute. This
//! module derives presentational output from it and wires three filters
//! into a [`HookRegistry`]:
//! - `addAttribute` declares the `style` attribute at registration time
//! - `addEditProps` wraps the edit-wrapper props callback at registration time
//! - `addSaveProps` injects derived styles into the saved element's props
//!
//! With global styles enabled the derived values are CSS custom properties
//! (see [`variables`]); otherwise a fixed set of inline style properties
//! (see [`inline`]).

pub mod config;
pub mod css;
pub mod inline;
pub mod support;
pub mod variables;

use serde_json::Value;
use std::sync::Arc;

use crate::core::block_type::{
    AttributeDeclaration, AttributeType, Attributes, BlockTypeDescriptor, EditWrapperProps,
};
use crate::core::props::RenderProps;
use crate::core::registry::{Filter, HookError, HookRegistry};
use crate::core::value::{Declarations, StyleConfig};

pub use config::{EnvGlobalStyles, GlobalStylesFlag, GlobalStylesSource, PipelineConfig};
pub use inline::get_inline_styles;
pub use support::has_style_support;
pub use variables::get_css_variables;

/// Name of the attribute holding a block's style configuration
pub const STYLE_ATTRIBUTE: &str = "style";

/// Style composition pipeline
///
/// Cheap to clone; clones share the configuration and the global styles
/// source.
#[derive(Clone)]
pub struct StylePipeline {
    config: Arc<PipelineConfig>,
    global_styles: Arc<dyn GlobalStylesSource>,
}

impl StylePipeline {
    /// Create a pipeline
    ///
    /// # Example
    /// ```
    /// use block_style::style::{GlobalStylesFlag, PipelineConfig, StylePipeline};
    ///
    /// let flag = GlobalStylesFlag::new(false);
    /// let pipeline = StylePipeline::new(PipelineConfig::default(), flag.clone());
    /// assert!(!pipeline.has_global_styles_support());
    /// flag.set(true);
    /// assert!(pipeline.has_global_styles_support());
    /// ```
    pub fn new(config: PipelineConfig, global_styles: impl GlobalStylesSource + 'static) -> Self {
        Self {
            config: Arc::new(config),
            global_styles: Arc::new(global_styles),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Sample the global styles flag
    pub fn has_global_styles_support(&self) -> bool {
        self.global_styles.is_enabled()
    }

    /// Derive the presentational declarations for a style configuration in
    /// the current mode
    pub fn compute_styles(&self, styles: &StyleConfig) -> Declarations {
        if self.has_global_styles_support() {
            get_css_variables(styles)
        } else {
            get_inline_styles(styles)
        }
    }

    /// Declare the `style` attribute on block types with style support.
    ///
    /// An existing `style` declaration is left untouched.
    pub fn add_attribute(&self, mut block_type: BlockTypeDescriptor) -> BlockTypeDescriptor {
        if !has_style_support(&block_type) {
            return block_type;
        }

        if !block_type.attributes.contains_key(STYLE_ATTRIBUTE) {
            tracing::trace!(block = %block_type.name, "declaring style attribute");
            block_type.attributes.insert(
                STYLE_ATTRIBUTE.to_string(),
                AttributeDeclaration::new(AttributeType::Object),
            );
        }
        block_type
    }

    /// Merge derived styles into a prop bag.
    ///
    /// Entries already present in `props.style` take precedence over the
    /// derived ones.
    pub fn add_save_props(
        &self,
        props: RenderProps,
        block_type: &BlockTypeDescriptor,
        attributes: &Attributes,
    ) -> RenderProps {
        if !has_style_support(block_type) {
            return props;
        }
        self.inject_styles(props, attributes)
    }

    /// Wrap the block type's edit-wrapper props callback so its output
    /// passes through [`StylePipeline::add_save_props`].
    ///
    /// Any previously installed callback runs first; wrapping composes, so
    /// several extensions can each extend the previous wrapper's output.
    pub fn add_edit_props(&self, mut block_type: BlockTypeDescriptor) -> BlockTypeDescriptor {
        if !has_style_support(&block_type) {
            return block_type;
        }

        let previous = block_type.edit_wrapper_props.take();
        let pipeline = self.clone();
        let gate = BlockTypeDescriptor {
            supports: block_type.supports.clone(),
            ..BlockTypeDescriptor::new(block_type.name.clone())
        };

        block_type.edit_wrapper_props = Some(EditWrapperProps::new(move |attributes| {
            let props = match &previous {
                Some(callback) => callback.call(attributes),
                None => RenderProps::new(),
            };
            pipeline.add_save_props(props, &gate, attributes)
        }));
        block_type
    }

    /// Register the pipeline's filters
    ///
    /// Registering twice replaces the earlier filters instead of adding
    /// duplicates.
    pub fn register(&self, hooks: &HookRegistry) -> Result<(), HookError> {
        let priority = self.config.priority;

        let pipeline = self.clone();
        hooks.add_filter(
            &self.config.filter_namespace("addAttribute"),
            priority,
            Filter::block_type(move |block_type, _name| pipeline.add_attribute(block_type)),
        )?;

        let pipeline = self.clone();
        hooks.add_filter(
            &self.config.filter_namespace("addSaveProps"),
            priority,
            Filter::save_props(move |props, block_type, attributes| {
                pipeline.add_save_props(props, block_type, attributes)
            }),
        )?;

        let pipeline = self.clone();
        hooks.add_filter(
            &self.config.filter_namespace("addEditProps"),
            priority,
            Filter::block_type(move |block_type, _name| pipeline.add_edit_props(block_type)),
        )?;

        tracing::debug!(namespace = %self.config.namespace, "style pipeline registered");
        Ok(())
    }

    fn inject_styles(&self, mut props: RenderProps, attributes: &Attributes) -> RenderProps {
        let styles = StyleConfig::from_attribute(attributes.get(STYLE_ATTRIBUTE));
        let mut style = self.compute_styles(&styles).to_json_map();

        match props.take_style() {
            Some(Value::Object(existing)) => {
                for (name, value) in existing {
                    style.insert(name, value);
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                tracing::warn!(style = %other, "dropping non-object style prop");
            }
        }

        props.set_style(style);
        props
    }
}
