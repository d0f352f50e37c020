//! Display fitting WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { fit_within } from '@pixelpress/wasm';
//!
//! const fit = fit_within(img.naturalWidth, img.naturalHeight, 500, 500);
//! canvas.width = fit.canvas_width;
//! canvas.height = fit.canvas_height;
//! ```

use crate::types::JsDisplayGeometry;
use pixelpress_core::{decode, BoundingBox};
use wasm_bindgen::prelude::*;

/// Compute the display size of an image inside a `max_width` x `max_height` box.
///
/// Images that already fit keep their size; larger ones are scaled down
/// uniformly. A zero dimension yields a 0x0 geometry.
#[wasm_bindgen]
pub fn fit_within(
    natural_width: u32,
    natural_height: u32,
    max_width: f64,
    max_height: f64,
) -> JsDisplayGeometry {
    decode::fit_within(
        natural_width,
        natural_height,
        BoundingBox::new(max_width, max_height),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_landscape() {
        let fit = fit_within(1000, 500, 500.0, 500.0);
        assert_eq!(fit.width(), 500.0);
        assert_eq!(fit.height(), 250.0);
    }

    #[test]
    fn test_fit_within_small_image_unchanged() {
        let fit = fit_within(320, 240, 500.0, 500.0);
        assert_eq!((fit.width(), fit.height()), (320.0, 240.0));
    }

    #[test]
    fn test_fit_within_truncates_canvas_size() {
        let fit = fit_within(1500, 1000, 500.0, 500.0);
        assert_eq!(fit.canvas_width(), 500);
        assert_eq!(fit.canvas_height(), 333);
    }
}
