//! The `ImageEditor` class.
//!
//! Wraps the core editor around a [`CanvasSurface`]. JavaScript owns the file
//! input and the sliders and forwards their events here; everything else
//! (fitting, filtering, drawing, export and reset) happens on the Rust side.
//!
//! # Example
//!
//! ```typescript
//! const editor = new ImageEditor(canvas, { format: { type: 'png' } });
//!
//! const ticket = editor.begin_load();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! if (editor.finish_load(ticket, bytes) === LoadStatus.Loaded) {
//!   console.log(`showing at ${editor.geometry()?.width}px wide`);
//! }
//!
//! editor.set_filter('brightness', 150);
//! editor.save(); // downloads edited-image.png and resets the sliders
//! ```

use pixelpress_core::{
    EditorConfig, EditorPhase, FilterState, ImageEditor, LoadOutcome, LoadToken,
};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::canvas::CanvasSurface;
use crate::download::trigger_download;
use crate::types::{JsDisplayGeometry, JsExportedImage};

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Outcome of `ImageEditor.finish_load`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The image replaced the previous one and is on the canvas.
    Loaded,
    /// No file was selected; nothing changed.
    NoSelection,
    /// A newer load started in the meantime; this one was dropped.
    Superseded,
}

impl From<LoadOutcome> for LoadStatus {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Loaded(_) => LoadStatus::Loaded,
            LoadOutcome::NoSelection => LoadStatus::NoSelection,
            LoadOutcome::Superseded => LoadStatus::Superseded,
        }
    }
}

/// Handle for a load in flight, returned by `ImageEditor.begin_load`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    token: LoadToken,
}

#[wasm_bindgen]
impl LoadTicket {
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.token.generation() as f64
    }
}

/// Interactive image editor drawing on a canvas.
#[wasm_bindgen(js_name = ImageEditor)]
pub struct JsImageEditor {
    inner: ImageEditor<CanvasSurface>,
}

#[wasm_bindgen(js_class = ImageEditor)]
impl JsImageEditor {
    /// Create an editor drawing on `canvas`.
    ///
    /// `config` is an optional plain object; omitted fields keep their defaults
    /// (500x500 box, `edited-image.png`, PNG).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<JsImageEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js)?
        };
        let surface = CanvasSurface::new(canvas).map_err(to_js)?;
        Ok(Self {
            inner: ImageEditor::with_config(surface, config),
        })
    }

    /// Start a load. Call before reading the selected file.
    pub fn begin_load(&mut self) -> LoadTicket {
        LoadTicket {
            token: self.inner.begin_load(),
        }
    }

    /// Complete the load started with `ticket`.
    ///
    /// Pass `undefined` when the file picker was dismissed. Throws if the file
    /// cannot be decoded; the editor is left as it was.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        bytes: Option<Vec<u8>>,
    ) -> Result<LoadStatus, JsValue> {
        self.inner
            .finish_load(ticket.token, bytes.as_deref())
            .map(LoadStatus::from)
            .map_err(to_js)
    }

    /// Decode and display `bytes` in one step.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<LoadStatus, JsValue> {
        self.inner.load(bytes).map(LoadStatus::from).map_err(to_js)
    }

    /// Set a slider by name (`brightness`, `contrast`, `grayscale`, `blur` or
    /// `rotate`) and redraw. Returns the clamped value that was stored.
    pub fn set_filter(&mut self, name: &str, value: f64) -> Result<f64, JsValue> {
        self.inner.set_filter_by_name(name, value).map_err(to_js)
    }

    /// Replace every slider from a plain object and redraw.
    pub fn set_filters(&mut self, filters: JsValue) -> Result<(), JsValue> {
        let filters: FilterState = serde_wasm_bindgen::from_value(filters).map_err(to_js)?;
        self.inner.set_filters(filters).map_err(to_js)
    }

    /// Current slider values as a plain object.
    pub fn filters(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.filters()).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.inner.filters().brightness()
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f64 {
        self.inner.filters().contrast()
    }

    #[wasm_bindgen(getter)]
    pub fn grayscale(&self) -> f64 {
        self.inner.filters().grayscale()
    }

    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f64 {
        self.inner.filters().blur()
    }

    #[wasm_bindgen(getter)]
    pub fn rotate(&self) -> f64 {
        self.inner.filters().rotate()
    }

    /// Canvas `filter` string for the current sliders.
    pub fn filter_css(&self) -> String {
        self.inner.filter_chain().to_css()
    }

    /// `idle`, `loaded`, `editing` or `saved`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.inner.phase()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.image().is_some()
    }

    /// Display geometry of the loaded image, if any.
    pub fn geometry(&self) -> Option<JsDisplayGeometry> {
        self.inner.geometry().map(JsDisplayGeometry::from)
    }

    /// Encode the canvas without downloading or resetting anything.
    pub fn export_image(&self) -> Result<JsExportedImage, JsValue> {
        self.inner.export().map(JsExportedImage::from).map_err(to_js)
    }

    /// Download the canvas as a file, then clear it and reset the sliders.
    ///
    /// Returns the encoded bytes.
    pub fn save(&mut self) -> Result<Vec<u8>, JsValue> {
        let exported = self.inner.export().map_err(to_js)?;
        trigger_download(&exported)?;
        self.inner.complete_save();
        Ok(exported.bytes)
    }

    /// Like `save` but without the download.
    pub fn save_bytes(&mut self) -> Result<Vec<u8>, JsValue> {
        self.inner.save().map(|exported| exported.bytes).map_err(to_js)
    }
}

fn phase_name(phase: EditorPhase) -> &'static str {
    match phase {
        EditorPhase::Idle => "idle",
        EditorPhase::Loaded => "loaded",
        EditorPhase::Editing => "editing",
        EditorPhase::Saved => "saved",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelpress_core::DisplayGeometry;

    #[test]
    fn test_load_status_from_outcome() {
        assert_eq!(
            LoadStatus::from(LoadOutcome::Loaded(DisplayGeometry::new(1.0, 1.0))),
            LoadStatus::Loaded
        );
        assert_eq!(LoadStatus::from(LoadOutcome::NoSelection), LoadStatus::NoSelection);
        assert_eq!(LoadStatus::from(LoadOutcome::Superseded), LoadStatus::Superseded);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(phase_name(EditorPhase::Idle), "idle");
        assert_eq!(phase_name(EditorPhase::Loaded), "loaded");
        assert_eq!(phase_name(EditorPhase::Editing), "editing");
        assert_eq!(phase_name(EditorPhase::Saved), "saved");
    }
}
