//! Block type runtime
//!
//! This module provides the registry that block types are registered into.
//! Registration runs the `blocks.registerBlockType` filter chain; rendering
//! helpers resolve save and edit-wrapper props for registered types.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::block_type::{Attributes, BlockTypeDescriptor};
use crate::core::props::RenderProps;
use crate::core::registry::HookRegistry;

/// Registry of block types
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct BlockTypeRegistry {
    hooks: HookRegistry,
    block_types: Arc<RwLock<HashMap<String, Arc<BlockTypeDescriptor>>>>,
}

impl BlockTypeRegistry {
    /// Create a registry whose registrations run through `hooks`
    pub fn new(hooks: HookRegistry) -> Self {
        Self {
            hooks,
            block_types: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The hook registry used by this registry
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Register a block type
    ///
    /// The descriptor passes through the registration filter chain before
    /// it is stored.
    ///
    /// # Returns
    /// * `Ok(Arc<BlockTypeDescriptor>)` with the filtered descriptor
    /// * `Err(BlockTypeError)` if the name is malformed or already registered
    pub fn register_block_type(
        &self,
        descriptor: BlockTypeDescriptor,
    ) -> Result<Arc<BlockTypeDescriptor>, BlockTypeError> {
        let name = descriptor.name.clone();
        validate_block_name(&name)?;

        if self.contains(&name) {
            return Err(BlockTypeError::AlreadyRegistered(name));
        }

        // Filters run without the lock held so they may query the registry
        let filtered = self.hooks.apply_block_type_filters(descriptor, &name);
        if filtered.name != name {
            return Err(BlockTypeError::InvalidName(filtered.name));
        }
        let filtered = Arc::new(filtered);

        let mut block_types = self.block_types.write();
        if block_types.contains_key(&name) {
            return Err(BlockTypeError::AlreadyRegistered(name));
        }
        block_types.insert(name.clone(), Arc::clone(&filtered));
        drop(block_types);

        tracing::debug!(block = %name, "block type registered");
        Ok(filtered)
    }

    /// Unregister a block type, returning its descriptor
    pub fn unregister_block_type(&self, name: &str) -> Result<Arc<BlockTypeDescriptor>, BlockTypeError> {
        let removed = self
            .block_types
            .write()
            .remove(name)
            .ok_or_else(|| BlockTypeError::NotFound(name.to_string()))?;
        tracing::debug!(block = %name, "block type unregistered");
        Ok(removed)
    }

    /// Get a block type by name
    pub fn get_block_type(&self, name: &str) -> Result<Arc<BlockTypeDescriptor>, BlockTypeError> {
        self.block_types
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| BlockTypeError::NotFound(name.to_string()))
    }

    /// Check if a block type is registered
    pub fn contains(&self, name: &str) -> bool {
        self.block_types.read().contains_key(name)
    }

    /// Number of registered block types
    pub fn count(&self) -> usize {
        self.block_types.read().len()
    }

    /// Registered block type names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.block_types.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Props for a block's saved element
    ///
    /// Runs the `blocks.getSaveContent.extraProps` chain over `props`.
    pub fn get_save_props(
        &self,
        name: &str,
        props: RenderProps,
        attributes: &Attributes,
    ) -> Result<RenderProps, BlockTypeError> {
        let block_type = self.get_block_type(name)?;
        Ok(self.hooks.apply_save_props_filters(props, &block_type, attributes))
    }

    /// Props for the wrapper element the editor renders around a block
    pub fn get_edit_wrapper_props(&self, name: &str, attributes: &Attributes) -> Result<RenderProps, BlockTypeError> {
        let block_type = self.get_block_type(name)?;
        Ok(block_type.edit_wrapper_props(attributes))
    }
}

impl Default for BlockTypeRegistry {
    fn default() -> Self {
        Self::new(HookRegistry::new())
    }
}

/// Validate a block name: `namespace/name`, each part a lowercase letter
/// followed by lowercase letters, digits or dashes.
fn validate_block_name(name: &str) -> Result<(), BlockTypeError> {
    fn valid_part(part: &str) -> bool {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    match name.split_once('/') {
        Some((namespace, local)) if valid_part(namespace) && valid_part(local) => Ok(()),
        _ => Err(BlockTypeError::InvalidName(name.to_string())),
    }
}

/// Block type registry error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockTypeError {
    /// Name is not of the form `namespace/name`
    #[error("Invalid block type name: {0:?}")]
    InvalidName(String),

    /// A block type with this name is already registered
    #[error("Block type already registered: {0}")]
    AlreadyRegistered(String),

    /// No block type with this name is registered
    #[error("Block type not found: {0}")]
    NotFound(String),
}
