//! Bilinear sampling of RGBA images.
//!
//! Coordinates are in source pixel space with pixel centers at integer
//! positions, so `(0.0, 0.0)` is the exact center of the top-left pixel.
//! Samples outside the image repeat the nearest edge pixel.

use image::{Rgba, RgbaImage};

/// Get a pixel as [f32; 4], clamping coordinates to the image.
#[inline]
fn get_pixel_f32(image: &RgbaImage, x: i64, y: i64) -> [f32; 4] {
    let px = x.clamp(0, image.width() as i64 - 1) as u32;
    let py = y.clamp(0, image.height() as i64 - 1) as u32;
    let Rgba(p) = *image.get_pixel(px, py);
    [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
pub(crate) fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    if image.width() == 0 || image.height() == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let x0 = x.floor();
    let y0 = y.floor();

    // Fractional distances
    let fx = (x - x0) as f32;
    let fy = (y - y0) as f32;

    let (x0, y0) = (x0 as i64, y0 as i64);
    let p00 = get_pixel_f32(image, x0, y0);
    let p10 = get_pixel_f32(image, x0 + 1, y0);
    let p01 = get_pixel_f32(image, x0, y0 + 1);
    let p11 = get_pixel_f32(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Rgba(result)
}
