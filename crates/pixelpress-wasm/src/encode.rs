//! Image encoding WASM bindings.
//!
//! Encodes raw RGBA pixels, e.g. from `ctx.getImageData(...).data`.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_jpeg`] - Encode RGBA pixel data to JPEG bytes, flattened onto black
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@pixelpress/wasm';
//!
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const png = encode_png(new Uint8Array(data.data.buffer), data.width, data.height);
//! ```

use pixelpress_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100. Transparent pixels come out black.
///
/// # Errors
///
/// Same as [`encode_png`].
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// Functions returning `Result<T, JsValue>` only run on wasm32 targets; the
/// native tests go through the core functions the bindings wrap.
#[cfg(test)]
mod tests {
    #[test]
    fn test_core_png_encoder_accepts_canvas_layout() {
        let pixels = vec![255u8; 4 * 4 * 4];
        let png = pixelpress_core::encode::encode_png(&pixels, 4, 4).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 10 * 10 * 4];
        let png = encode_png(&pixels, 10, 10).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_dimensions() {
        assert!(encode_png(&[], 0, 10).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 20 * 20 * 4];
        let jpeg = encode_jpeg(&pixels, 20, 20, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 20 * 20 * 3];
        assert!(encode_jpeg(&pixels, 20, 20, 90).is_err());
    }
}
