//! Style capability gate

use crate::core::block_type::BlockTypeDescriptor;

/// Capability flag for color support
pub const COLOR_SUPPORT_KEY: &str = "__experimentalColor";

/// Capability flag for line height support
pub const LINE_HEIGHT_SUPPORT_KEY: &str = "__experimentalLineHeight";

/// Capabilities that opt a block type into the style pipeline
pub const STYLE_SUPPORT_KEYS: [&str; 2] = [COLOR_SUPPORT_KEY, LINE_HEIGHT_SUPPORT_KEY];

/// True iff the block type supports at least one style capability
pub fn has_style_support(block_type: &BlockTypeDescriptor) -> bool {
    STYLE_SUPPORT_KEYS
        .iter()
        .any(|key| block_type.has_support(key, false))
}
