//! WASM API: `#[wasm_bindgen]` exports for a JavaScript editor host.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_editor` / `reset_editor`: lifecycle
//! - `set_global_styles`: toggle the global styles mode
//! - `css_variables` / `inline_styles`: direct style derivation
//! - `register_block_type`: registration through the filter chain
//! - `save_props` / `edit_wrapper_props`: props for registered blocks
//!
//! Every export returns a JSON string; failures are `{"error": "..."}`.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::core::block_type::{Attributes, BlockTypeDescriptor};
use crate::core::props::RenderProps;
use crate::core::registry::HookRegistry;
use crate::core::value::StyleConfig;
use crate::runtime::BlockTypeRegistry;
use crate::style::{get_css_variables, get_inline_styles, GlobalStylesFlag, PipelineConfig, StylePipeline};

// ── Global state ────────────────────────────────────────────────────────────

struct WasmEditor {
    registry: BlockTypeRegistry,
    global_styles: GlobalStylesFlag,
}

thread_local! {
    static EDITOR: RefCell<Option<WasmEditor>> = RefCell::new(None);
}

fn with_editor<R>(f: impl FnOnce(&WasmEditor) -> R) -> Result<R, String> {
    EDITOR.with(|cell| match cell.borrow().as_ref() {
        Some(editor) => Ok(f(editor)),
        None => Err("Editor not initialized. Call init_editor() first.".into()),
    })
}

// ── Response helpers ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct RegisteredResponse {
    name: String,
    attributes: Vec<String>,
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn json_ok<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_err(format!("Serialization failed: {}", e)))
}

fn parse_attributes(attributes_json: &str) -> Result<Attributes, String> {
    serde_json::from_str(attributes_json).map_err(|e| format!("Invalid attributes JSON: {}", e))
}

fn parse_style(style_json: &str) -> Result<StyleConfig, String> {
    serde_json::from_str(style_json).map_err(|e| format!("Invalid style JSON: {}", e))
}

// ── Exported functions ──────────────────────────────────────────────────────

/// Create the editor state and register the style pipeline
#[wasm_bindgen]
pub fn init_editor(global_styles: bool) -> String {
    console_error_panic_hook::set_once();

    let flag = GlobalStylesFlag::new(global_styles);
    let hooks = HookRegistry::new();
    let pipeline = StylePipeline::new(PipelineConfig::default(), flag.clone());
    if let Err(e) = pipeline.register(&hooks) {
        return json_err(e.to_string());
    }

    EDITOR.with(|cell| {
        *cell.borrow_mut() = Some(WasmEditor {
            registry: BlockTypeRegistry::new(hooks),
            global_styles: flag,
        });
    });
    json_ok(&serde_json::json!({ "ok": true }))
}

#[wasm_bindgen]
pub fn reset_editor() {
    EDITOR.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn set_global_styles(enabled: bool) -> String {
    match with_editor(|editor| editor.global_styles.set(enabled)) {
        Ok(()) => json_ok(&serde_json::json!({ "globalStyles": enabled })),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn css_variables(style_json: &str) -> String {
    match parse_style(style_json) {
        Ok(styles) => json_ok(&get_css_variables(&styles)),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn inline_styles(style_json: &str) -> String {
    match parse_style(style_json) {
        Ok(styles) => json_ok(&get_inline_styles(&styles)),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn register_block_type(descriptor_json: &str) -> String {
    let descriptor: BlockTypeDescriptor = match serde_json::from_str(descriptor_json) {
        Ok(d) => d,
        Err(e) => return json_err(format!("Invalid block type JSON: {}", e)),
    };

    match with_editor(|editor| editor.registry.register_block_type(descriptor)) {
        Ok(Ok(block_type)) => {
            let mut attributes: Vec<String> = block_type.attributes.keys().cloned().collect();
            attributes.sort();
            json_ok(&RegisteredResponse {
                name: block_type.name.clone(),
                attributes,
            })
        }
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn save_props(name: &str, props_json: &str, attributes_json: &str) -> String {
    let props: RenderProps = match serde_json::from_str(props_json) {
        Ok(p) => p,
        Err(e) => return json_err(format!("Invalid props JSON: {}", e)),
    };
    let attributes = match parse_attributes(attributes_json) {
        Ok(a) => a,
        Err(e) => return json_err(e),
    };

    match with_editor(|editor| editor.registry.get_save_props(name, props, &attributes)) {
        Ok(Ok(props)) => json_ok(&props),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn edit_wrapper_props(name: &str, attributes_json: &str) -> String {
    let attributes = match parse_attributes(attributes_json) {
        Ok(a) => a,
        Err(e) => return json_err(e),
    };

    match with_editor(|editor| editor.registry.get_edit_wrapper_props(name, &attributes)) {
        Ok(Ok(props)) => json_ok(&props),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}
