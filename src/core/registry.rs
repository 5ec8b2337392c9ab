//! Hook Registry - named, ordered filter chains
//!
//! Extensions customize block types by registering filters on well-known
//! hooks. This module provides a thread-safe registry for them. It supports:
//! - Filter registration under a namespace, with a priority
//! - Idempotent re-registration keyed on `(hook, namespace)`
//! - Removal and lookup by hook and namespace
//! - Applying a hook's chain to a value
//!
//! Filters run in ascending priority; filters with equal priority run in
//! registration order.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use super::block_type::{Attributes, BlockTypeDescriptor};
use super::props::RenderProps;

/// Hook run on every block type at registration time
pub const REGISTER_BLOCK_TYPE: &str = "blocks.registerBlockType";

/// Hook run when computing the extra props of a block's saved element
pub const SAVE_CONTENT_EXTRA_PROPS: &str = "blocks.getSaveContent.extraProps";

/// Priority used when the caller has no ordering preference
pub const DEFAULT_PRIORITY: i32 = 10;

/// Filter on [`REGISTER_BLOCK_TYPE`]: receives the descriptor and the block name
pub type BlockTypeFilter = Arc<dyn Fn(BlockTypeDescriptor, &str) -> BlockTypeDescriptor + Send + Sync>;

/// Filter on [`SAVE_CONTENT_EXTRA_PROPS`]
pub type SavePropsFilter =
    Arc<dyn Fn(RenderProps, &BlockTypeDescriptor, &Attributes) -> RenderProps + Send + Sync>;

/// A filter callback tagged with the hook it belongs to
#[derive(Clone)]
pub enum Filter {
    BlockType(BlockTypeFilter),
    SaveProps(SavePropsFilter),
}

impl Filter {
    /// Wrap a block type registration filter
    pub fn block_type(
        f: impl Fn(BlockTypeDescriptor, &str) -> BlockTypeDescriptor + Send + Sync + 'static,
    ) -> Self {
        Filter::BlockType(Arc::new(f))
    }

    /// Wrap a save-content extra props filter
    pub fn save_props(
        f: impl Fn(RenderProps, &BlockTypeDescriptor, &Attributes) -> RenderProps + Send + Sync + 'static,
    ) -> Self {
        Filter::SaveProps(Arc::new(f))
    }

    /// Name of the hook this filter runs on
    pub fn hook_name(&self) -> &'static str {
        match self {
            Filter::BlockType(_) => REGISTER_BLOCK_TYPE,
            Filter::SaveProps(_) => SAVE_CONTENT_EXTRA_PROPS,
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filter({})", self.hook_name())
    }
}

/// Outcome of a filter registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The namespace was new on this hook
    Added,
    /// An existing filter with the same namespace was replaced
    Replaced,
}

#[derive(Clone)]
struct FilterEntry<F> {
    namespace: String,
    priority: i32,
    callback: F,
}

/// Ordered filter chain for one hook
struct FilterChain<F> {
    entries: Vec<FilterEntry<F>>,
}

impl<F: Clone> FilterChain<F> {
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    fn add(&mut self, namespace: &str, priority: i32, callback: F) -> Registration {
        let outcome = match self.entries.iter().position(|e| e.namespace == namespace) {
            Some(pos) if self.entries[pos].priority == priority => {
                self.entries[pos].callback = callback;
                return Registration::Replaced;
            }
            Some(pos) => {
                self.entries.remove(pos);
                Registration::Replaced
            }
            None => Registration::Added,
        };

        // Insert after every entry with priority <= ours
        let at = self
            .entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            at,
            FilterEntry {
                namespace: namespace.to_string(),
                priority,
                callback,
            },
        );
        outcome
    }

    fn remove(&mut self, namespace: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.namespace != namespace);
        self.entries.len() != before
    }

    fn contains(&self, namespace: Option<&str>) -> bool {
        match namespace {
            Some(ns) => self.entries.iter().any(|e| e.namespace == ns),
            None => !self.entries.is_empty(),
        }
    }

    fn namespaces(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.namespace.clone()).collect()
    }

    /// Clone the callbacks so the chain can run without holding the lock
    fn snapshot(&self) -> Vec<F> {
        self.entries.iter().map(|e| e.callback.clone()).collect()
    }
}

struct Hooks {
    block_type: FilterChain<BlockTypeFilter>,
    save_props: FilterChain<SavePropsFilter>,
}

/// Hook registry
///
/// Cloning yields another handle to the same registry. Filters are applied
/// against a snapshot, so a filter may itself register or remove filters
/// without deadlocking; the change takes effect on the next application.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<RwLock<Hooks>>,
}

impl HookRegistry {
    /// Create a new registry with no filters
    ///
    /// # Example
    /// ```
    /// use block_style::core::registry::{HookRegistry, REGISTER_BLOCK_TYPE};
    ///
    /// let hooks = HookRegistry::new();
    /// assert!(!hooks.has_filter(REGISTER_BLOCK_TYPE, None).unwrap());
    /// ```
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(RwLock::new(Hooks {
                block_type: FilterChain::new(),
                save_props: FilterChain::new(),
            })),
        }
    }

    /// Register a filter
    ///
    /// # Arguments
    /// * `namespace` - Stable identifier of the filter, e.g. `core/style/addAttribute`
    /// * `priority` - Lower runs first
    /// * `filter` - The callback; its variant decides the hook
    ///
    /// # Returns
    /// * `Ok(Registration)` telling whether the namespace was new on the hook
    /// * `Err(HookError)` if the namespace is malformed
    pub fn add_filter(&self, namespace: &str, priority: i32, filter: Filter) -> Result<Registration, HookError> {
        validate_namespace(namespace)?;
        let hook = filter.hook_name();

        let outcome = {
            let mut hooks = self.hooks.write();
            match filter {
                Filter::BlockType(f) => hooks.block_type.add(namespace, priority, f),
                Filter::SaveProps(f) => hooks.save_props.add(namespace, priority, f),
            }
        };

        match outcome {
            Registration::Added => tracing::debug!(hook, namespace, priority, "filter added"),
            Registration::Replaced => tracing::warn!(hook, namespace, priority, "filter replaced"),
        }
        Ok(outcome)
    }

    /// Remove a filter
    ///
    /// # Returns
    /// * `Ok(true)` if a filter was removed, `Ok(false)` if none matched
    /// * `Err(HookError)` if the hook name is unknown
    pub fn remove_filter(&self, hook: &str, namespace: &str) -> Result<bool, HookError> {
        let mut hooks = self.hooks.write();
        let removed = match hook {
            REGISTER_BLOCK_TYPE => hooks.block_type.remove(namespace),
            SAVE_CONTENT_EXTRA_PROPS => hooks.save_props.remove(namespace),
            _ => return Err(HookError::UnknownHook(hook.to_string())),
        };
        if removed {
            tracing::debug!(hook, namespace, "filter removed");
        }
        Ok(removed)
    }

    /// Remove every filter on a hook, returning how many were removed
    pub fn remove_all_filters(&self, hook: &str) -> Result<usize, HookError> {
        let mut hooks = self.hooks.write();
        let removed = match hook {
            REGISTER_BLOCK_TYPE => std::mem::replace(&mut hooks.block_type, FilterChain::new()).entries.len(),
            SAVE_CONTENT_EXTRA_PROPS => std::mem::replace(&mut hooks.save_props, FilterChain::new()).entries.len(),
            _ => return Err(HookError::UnknownHook(hook.to_string())),
        };
        Ok(removed)
    }

    /// Check for a filter on a hook, optionally under a specific namespace
    pub fn has_filter(&self, hook: &str, namespace: Option<&str>) -> Result<bool, HookError> {
        let hooks = self.hooks.read();
        match hook {
            REGISTER_BLOCK_TYPE => Ok(hooks.block_type.contains(namespace)),
            SAVE_CONTENT_EXTRA_PROPS => Ok(hooks.save_props.contains(namespace)),
            _ => Err(HookError::UnknownHook(hook.to_string())),
        }
    }

    /// Namespaces registered on a hook, in execution order
    pub fn namespaces(&self, hook: &str) -> Result<Vec<String>, HookError> {
        let hooks = self.hooks.read();
        match hook {
            REGISTER_BLOCK_TYPE => Ok(hooks.block_type.namespaces()),
            SAVE_CONTENT_EXTRA_PROPS => Ok(hooks.save_props.namespaces()),
            _ => Err(HookError::UnknownHook(hook.to_string())),
        }
    }

    /// Number of filters on a hook
    pub fn filter_count(&self, hook: &str) -> Result<usize, HookError> {
        Ok(self.namespaces(hook)?.len())
    }

    /// Run the block type registration chain
    pub fn apply_block_type_filters(&self, mut descriptor: BlockTypeDescriptor, name: &str) -> BlockTypeDescriptor {
        let chain = self.hooks.read().block_type.snapshot();
        for filter in chain {
            descriptor = filter(descriptor, name);
        }
        descriptor
    }

    /// Run the save-content extra props chain
    pub fn apply_save_props_filters(
        &self,
        mut props: RenderProps,
        block_type: &BlockTypeDescriptor,
        attributes: &Attributes,
    ) -> RenderProps {
        let chain = self.hooks.read().save_props.snapshot();
        for filter in chain {
            props = filter(props, block_type, attributes);
        }
        props
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a filter namespace: a letter followed by letters, digits,
/// `_`, `.`, `-` or `/`.
fn validate_namespace(namespace: &str) -> Result<(), HookError> {
    let mut chars = namespace.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/'))
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(HookError::InvalidNamespace(namespace.to_string()))
    }
}

/// Hook registry error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// Namespace does not match the allowed pattern
    #[error("Invalid filter namespace: {0:?}")]
    InvalidNamespace(String),

    /// No hook with this name exists
    #[error("Unknown hook: {0}")]
    UnknownHook(String),
}
