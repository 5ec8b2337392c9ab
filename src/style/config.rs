//! Pipeline configuration and global styles mode sources
//!
//! The global styles flag decides whether derived styles are emitted as CSS
//! custom properties or as inline style properties. It is supplied to the
//! pipeline as a [`GlobalStylesSource`] and sampled on every call.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::registry::DEFAULT_PRIORITY;

/// Environment variable read by [`EnvGlobalStyles::default`]
pub const GLOBAL_STYLES_ENV_VAR: &str = "BLOCK_STYLE_GLOBAL_STYLES";

/// Style pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Prefix of the filter namespaces the pipeline registers under
    pub namespace: String,
    /// Priority of the registered filters
    pub priority: i32,
}

impl PipelineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            namespace: "core/style".to_string(),
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Set the namespace prefix
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the filter priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Full namespace of one of the pipeline's filters
    pub fn filter_namespace(&self, filter: &str) -> String {
        format!("{}/{}", self.namespace, filter)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of the global styles mode flag
pub trait GlobalStylesSource: Send + Sync {
    /// Current value of the flag
    fn is_enabled(&self) -> bool;
}

impl GlobalStylesSource for bool {
    fn is_enabled(&self) -> bool {
        *self
    }
}

/// Shared flag that can be toggled at runtime
///
/// Clones share the same underlying value.
#[derive(Debug, Clone, Default)]
pub struct GlobalStylesFlag(Arc<AtomicBool>);

impl GlobalStylesFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

impl GlobalStylesSource for GlobalStylesFlag {
    fn is_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Flag read from an environment variable on every call
///
/// `1`, `true`, `yes` and `on` (any case) enable global styles; anything
/// else, including an unset variable, disables them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvGlobalStyles {
    var: String,
}

impl EnvGlobalStyles {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvGlobalStyles {
    fn default() -> Self {
        Self::new(GLOBAL_STYLES_ENV_VAR)
    }
}

impl GlobalStylesSource for EnvGlobalStyles {
    fn is_enabled(&self) -> bool {
        std::env::var(&self.var)
            .map(|v| parse_flag(&v))
            .unwrap_or(false)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
