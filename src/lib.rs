//! Block Style - style attribute composition for block editor extensions
//!
//! This crate derives presentational output from a block's `style`
//! attribute and provides the hook and block type registries the style
//! pipeline plugs into.

pub mod core;
pub mod style;
pub mod runtime;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use self::core::{Attributes, BlockTypeDescriptor, HookRegistry, RenderProps, StyleConfig};
pub use runtime::BlockTypeRegistry;
pub use style::{GlobalStylesFlag, PipelineConfig, StylePipeline};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
