//! Pixelpress WASM - WebAssembly bindings for Pixelpress
//!
//! This crate exposes the pixelpress-core editor to JavaScript, drawing on an
//! HTML canvas and handing exports to the browser as downloads.
//!
//! # Module Structure
//!
//! - `editor` - The `ImageEditor` class driving a canvas
//! - `canvas` - Canvas 2D implementation of the core drawing surface
//! - `download` - Browser download of exported files
//! - `filters` - Standalone filter state and CSS composition
//! - `decode` - Display fitting helpers
//! - `encode` - PNG/JPEG encoding of raw RGBA pixels
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { ImageEditor } from '@pixelpress/wasm';
//!
//! await init();
//!
//! const editor = new ImageEditor(canvas);
//! input.onchange = async () => {
//!   const ticket = editor.begin_load();
//!   const file = input.files?.[0];
//!   const bytes = file ? new Uint8Array(await file.arrayBuffer()) : undefined;
//!   editor.finish_load(ticket, bytes);
//! };
//! slider.oninput = () => editor.set_filter('brightness', slider.valueAsNumber);
//! button.onclick = () => editor.save();
//! ```

use wasm_bindgen::prelude::*;

mod canvas;
mod decode;
mod download;
mod editor;
mod encode;
mod filters;
mod types;

// Re-export public types
pub use canvas::CanvasSurface;
pub use decode::fit_within;
pub use download::{download_export, trigger_download};
pub use editor::{JsImageEditor, LoadStatus, LoadTicket};
pub use encode::{encode_jpeg, encode_png};
pub use filters::{compose_filter_css, rotation_radians, JsFilterState};
pub use types::{JsDisplayGeometry, JsExportedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("Pixelpress WASM {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
