//! WASM-compatible wrapper types.
//!
//! JavaScript-friendly views of core values that cross the boundary by value.

use pixelpress_core::{DisplayGeometry, ExportedImage};
use wasm_bindgen::prelude::*;

/// Size at which an image is displayed on the canvas.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsDisplayGeometry {
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl JsDisplayGeometry {
    /// Display width, possibly fractional
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Display height, possibly fractional
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Canvas width in pixels (the display width truncated)
    #[wasm_bindgen(getter)]
    pub fn canvas_width(&self) -> u32 {
        self.inner().surface_size().0
    }

    /// Canvas height in pixels (the display height truncated)
    #[wasm_bindgen(getter)]
    pub fn canvas_height(&self) -> u32 {
        self.inner().surface_size().1
    }
}

impl JsDisplayGeometry {
    fn inner(&self) -> DisplayGeometry {
        DisplayGeometry::new(self.width, self.height)
    }
}

impl From<DisplayGeometry> for JsDisplayGeometry {
    fn from(geometry: DisplayGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
        }
    }
}

/// An encoded export.
///
/// `bytes()` copies the encoded file into a new `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsExportedImage {
    inner: ExportedImage,
}

#[wasm_bindgen]
impl JsExportedImage {
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl From<ExportedImage> for JsExportedImage {
    fn from(inner: ExportedImage) -> Self {
        Self { inner }
    }
}

impl JsExportedImage {
    pub(crate) fn inner(&self) -> &ExportedImage {
        &self.inner
    }
}
