//! Pixelpress Core - Image editing library
//!
//! This crate provides the platform-independent part of the Pixelpress editor:
//! image loading, display fitting, filter composition, rendering onto a drawing
//! surface, export encoding, and the editor state machine that ties them together.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod adjustments;
pub mod config;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod export;
pub mod filters;
pub mod render;
pub mod surface;
pub mod transform;

pub use config::{EditorConfig, ExportFormat};
pub use decode::{decode_image, fit_within, BoundingBox, DecodeError, DisplayGeometry, LoadedImage};
pub use editor::{EditorError, EditorPhase, ImageEditor, LoadOutcome, LoadToken};
pub use export::{ExportError, ExportedImage, EXPORT_FILE_NAME};
pub use filters::{FilterChain, FilterEffect, FilterKind, FilterUnit};
pub use render::render;
pub use surface::{RasterSurface, Surface, SurfaceError};
pub use transform::{rotation_radians, Transform2D};

/// One of the five slider-controlled editing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterParam {
    /// Brightness in percent (0 to 200)
    Brightness,
    /// Contrast in percent (0 to 200)
    Contrast,
    /// Grayscale amount in percent (0 to 100)
    Grayscale,
    /// Blur radius in pixels (0 to 10)
    Blur,
    /// Rotation slider value (0 to 360)
    Rotate,
}

impl FilterParam {
    /// All parameters in control order.
    pub const ALL: [FilterParam; 5] = [
        FilterParam::Brightness,
        FilterParam::Contrast,
        FilterParam::Grayscale,
        FilterParam::Blur,
        FilterParam::Rotate,
    ];

    /// Control name as used by the UI surface.
    pub fn name(self) -> &'static str {
        match self {
            FilterParam::Brightness => "brightness",
            FilterParam::Contrast => "contrast",
            FilterParam::Grayscale => "grayscale",
            FilterParam::Blur => "blur",
            FilterParam::Rotate => "rotate",
        }
    }

    /// Lowest accepted value.
    pub fn min(self) -> f64 {
        0.0
    }

    /// Highest accepted value.
    pub fn max(self) -> f64 {
        match self {
            FilterParam::Brightness | FilterParam::Contrast => 200.0,
            FilterParam::Grayscale => 100.0,
            FilterParam::Blur => 10.0,
            FilterParam::Rotate => 360.0,
        }
    }

    /// Clamp a value into this parameter's range.
    ///
    /// Returns `None` for NaN, which has no meaningful position in the range.
    pub fn clamp(self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        Some(value.clamp(self.min(), self.max()))
    }
}

impl fmt::Display for FilterParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a control name does not match any [`FilterParam`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown filter parameter: {0}")]
pub struct UnknownFilterError(pub String);

impl FromStr for FilterParam {
    type Err = UnknownFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterParam::ALL
            .into_iter()
            .find(|param| param.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFilterError(s.to_string()))
    }
}

/// The editing parameters driven by the sliders.
///
/// Every field is kept inside its [`FilterParam`] range; values are clamped
/// on the way in, so a `FilterState` can never hold an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilterStateRepr")]
pub struct FilterState {
    brightness: f64,
    contrast: f64,
    grayscale: f64,
    blur: f64,
    rotate: f64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::initial()
    }
}

impl FilterState {
    /// Create a state from explicit values, clamping each into range.
    ///
    /// NaN falls back to the value [`FilterState::initial`] uses for that field.
    pub fn new(brightness: f64, contrast: f64, grayscale: f64, blur: f64, rotate: f64) -> Self {
        let mut state = Self::initial();
        for (param, value) in [
            (FilterParam::Brightness, brightness),
            (FilterParam::Contrast, contrast),
            (FilterParam::Grayscale, grayscale),
            (FilterParam::Blur, blur),
            (FilterParam::Rotate, rotate),
        ] {
            state.set(param, value);
        }
        state
    }

    /// State of a freshly created editor (brightness starts at 50%).
    pub const fn initial() -> Self {
        Self {
            brightness: 50.0,
            contrast: 100.0,
            grayscale: 0.0,
            blur: 0.0,
            rotate: 0.0,
        }
    }

    /// State the editor returns to after an export.
    pub const fn post_export() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            grayscale: 0.0,
            blur: 0.0,
            rotate: 0.0,
        }
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    pub fn grayscale(&self) -> f64 {
        self.grayscale
    }

    pub fn blur(&self) -> f64 {
        self.blur
    }

    pub fn rotate(&self) -> f64 {
        self.rotate
    }

    /// Read a parameter by name.
    pub fn get(&self, param: FilterParam) -> f64 {
        match param {
            FilterParam::Brightness => self.brightness,
            FilterParam::Contrast => self.contrast,
            FilterParam::Grayscale => self.grayscale,
            FilterParam::Blur => self.blur,
            FilterParam::Rotate => self.rotate,
        }
    }

    /// Set a parameter, clamping it into range.
    ///
    /// Returns the stored value, or `None` if `value` was NaN and the field
    /// was left unchanged.
    pub fn set(&mut self, param: FilterParam, value: f64) -> Option<f64> {
        let value = param.clamp(value)?;
        let slot = match param {
            FilterParam::Brightness => &mut self.brightness,
            FilterParam::Contrast => &mut self.contrast,
            FilterParam::Grayscale => &mut self.grayscale,
            FilterParam::Blur => &mut self.blur,
            FilterParam::Rotate => &mut self.rotate,
        };
        *slot = value;
        Some(value)
    }

    /// Builder-style variant of [`FilterState::set`].
    pub fn with(mut self, param: FilterParam, value: f64) -> Self {
        self.set(param, value);
        self
    }
}

/// Unvalidated wire form of [`FilterState`]; missing fields take initial values.
#[derive(Deserialize)]
#[serde(default)]
struct FilterStateRepr {
    brightness: f64,
    contrast: f64,
    grayscale: f64,
    blur: f64,
    rotate: f64,
}

impl Default for FilterStateRepr {
    fn default() -> Self {
        let initial = FilterState::initial();
        Self {
            brightness: initial.brightness,
            contrast: initial.contrast,
            grayscale: initial.grayscale,
            blur: initial.blur,
            rotate: initial.rotate,
        }
    }
}

impl From<FilterStateRepr> for FilterState {
    fn from(repr: FilterStateRepr) -> Self {
        FilterState::new(
            repr.brightness,
            repr.contrast,
            repr.grayscale,
            repr.blur,
            repr.rotate,
        )
    }
}
