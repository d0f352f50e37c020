//! Display fitting: shrink an image into a bounding box without distorting it.

use serde::{Deserialize, Serialize};

/// Maximum display dimensions enforced by [`fit_within`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub max_width: f64,
    pub max_height: f64,
}

impl BoundingBox {
    /// The editor's 500x500 display box.
    pub const DEFAULT: BoundingBox = BoundingBox {
        max_width: 500.0,
        max_height: 500.0,
    };

    pub const fn new(max_width: f64, max_height: f64) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Size at which an image is displayed on the drawing surface.
///
/// Dimensions are fractional. The surface backing store takes the truncated
/// integer size (see [`DisplayGeometry::surface_size`]) while the image itself is
/// drawn at the exact fractional size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub width: f64,
    pub height: f64,
}

impl DisplayGeometry {
    pub const ZERO: DisplayGeometry = DisplayGeometry {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Integer backing-store size, truncating like a canvas assigned fractional dimensions.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// Width divided by height, or `None` for a degenerate geometry.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.width > 0.0 && self.height > 0.0).then(|| self.width / self.height)
    }

    /// Check that this geometry lies inside `bounds`.
    pub fn fits(&self, bounds: BoundingBox) -> bool {
        self.width <= bounds.max_width && self.height <= bounds.max_height
    }
}

/// Compute the display size of an image inside a bounding box.
///
/// Images that already fit are passed through unchanged; nothing is ever scaled
/// up. Otherwise both dimensions are multiplied by the single factor
/// `min(max_width / width, max_height / height)`, so the aspect ratio is kept
/// exactly and neither dimension exceeds the box.
///
/// A zero width or height yields [`DisplayGeometry::ZERO`].
pub fn fit_within(natural_width: u32, natural_height: u32, bounds: BoundingBox) -> DisplayGeometry {
    if natural_width == 0 || natural_height == 0 {
        return DisplayGeometry::ZERO;
    }

    let width = natural_width as f64;
    let height = natural_height as f64;

    if width <= bounds.max_width && height <= bounds.max_height {
        return DisplayGeometry::new(width, height);
    }

    let ratio = (bounds.max_width / width).min(bounds.max_height / height);
    DisplayGeometry::new(width * ratio, height * ratio)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
