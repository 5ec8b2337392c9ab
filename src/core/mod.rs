//! Core block abstractions and types
//!
//! This module defines block type descriptors, the style value model, render
//! prop bags and the hook registry that extensions plug into.

pub mod value;
pub mod props;
pub mod block_type;
pub mod registry;

pub use block_type::{
    has_block_support, AttributeDeclaration, AttributeType, Attributes, BlockTypeDescriptor,
    EditWrapperProps,
};
pub use props::RenderProps;
pub use registry::{Filter, HookError, HookRegistry, Registration};
pub use value::{Declarations, ScalarValue, StyleConfig, StyleValue};
