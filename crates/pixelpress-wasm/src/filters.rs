//! Filter state WASM bindings.
//!
//! A standalone `FilterState` wrapper for hosts that keep the slider values on
//! the JavaScript side and only need the composed canvas filter string.

use pixelpress_core::{FilterChain, FilterParam, FilterState};
use wasm_bindgen::prelude::*;

/// Slider values wrapper for JavaScript
///
/// Setters clamp into each parameter's range; NaN is ignored.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JsFilterState {
    inner: FilterState,
}

#[wasm_bindgen]
impl JsFilterState {
    /// Create a state with the editor's initial values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: FilterState::initial(),
        }
    }

    /// State the editor returns to after an export
    pub fn post_export() -> Self {
        Self {
            inner: FilterState::post_export(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.inner.brightness()
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f64) {
        self.inner.set(FilterParam::Brightness, value);
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f64 {
        self.inner.contrast()
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f64) {
        self.inner.set(FilterParam::Contrast, value);
    }

    #[wasm_bindgen(getter)]
    pub fn grayscale(&self) -> f64 {
        self.inner.grayscale()
    }

    #[wasm_bindgen(setter)]
    pub fn set_grayscale(&mut self, value: f64) {
        self.inner.set(FilterParam::Grayscale, value);
    }

    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f64 {
        self.inner.blur()
    }

    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: f64) {
        self.inner.set(FilterParam::Blur, value);
    }

    #[wasm_bindgen(getter)]
    pub fn rotate(&self) -> f64 {
        self.inner.rotate()
    }

    #[wasm_bindgen(setter)]
    pub fn set_rotate(&mut self, value: f64) {
        self.inner.set(FilterParam::Rotate, value);
    }

    /// Canvas `filter` string for the current values
    pub fn filter_css(&self) -> String {
        FilterChain::from_state(&self.inner).to_css()
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object; missing fields take initial values
    pub fn from_json(value: JsValue) -> Result<JsFilterState, JsValue> {
        let inner: FilterState =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl From<FilterState> for JsFilterState {
    fn from(inner: FilterState) -> Self {
        Self { inner }
    }
}

impl JsFilterState {
    pub(crate) fn inner(&self) -> &FilterState {
        &self.inner
    }
}

/// Compose the canvas `filter` string for a state.
///
/// # Example (TypeScript)
/// ```typescript
/// const state = new JsFilterState();
/// state.brightness = 150;
/// ctx.filter = compose_filter_css(state);
/// // "brightness(150%) contrast(100%) grayscale(0%) blur(0px)"
/// ```
#[wasm_bindgen]
pub fn compose_filter_css(state: &JsFilterState) -> String {
    FilterChain::from_state(state.inner()).to_css()
}

/// Angle in radians the renderer rotates by for a rotate slider value.
#[wasm_bindgen]
pub fn rotation_radians(rotate: f64) -> f64 {
    pixelpress_core::rotation_radians(rotate)
}
