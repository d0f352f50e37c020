//! In-memory drawing surface.
//!
//! `RasterSurface` renders on the CPU into an RGBA8 buffer. Drawing inverse-maps
//! every surface pixel center through the current transform, samples the source
//! bilinearly, runs the current filter chain over the drawn layer and composites
//! the layer onto the surface with source-over blending.

use image::{Rgba, RgbaImage};
use log::trace;

use super::sample::sample_bilinear;
use super::{Surface, SurfaceError};
use crate::adjustments::apply_filter_chain;
use crate::decode::LoadedImage;
use crate::filters::FilterChain;
use crate::transform::Transform2D;

/// Transform and filter pushed by `save`.
#[derive(Debug, Clone, Default, PartialEq)]
struct DrawState {
    transform: Transform2D,
    filter: FilterChain,
}

/// A CPU-backed [`Surface`].
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl RasterSurface {
    /// Width of a surface nobody has sized yet, as for a fresh canvas.
    pub const DEFAULT_WIDTH: u32 = 300;
    /// Height of a surface nobody has sized yet, as for a fresh canvas.
    pub const DEFAULT_HEIGHT: u32 = 150;

    /// Create a transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Current contents.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Current transform.
    pub fn transform(&self) -> Transform2D {
        self.state.transform
    }

    /// Current filter chain.
    pub fn filter(&self) -> &FilterChain {
        &self.state.filter
    }

    /// Number of states pushed by `save` and not yet restored.
    pub fn saved_states(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
        self.state = DrawState::default();
        self.stack.clear();
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn set_filter(&mut self, chain: &FilterChain) {
        self.state.filter = chain.clone();
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.state.transform.translate(x, y);
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError> {
        self.state.transform.rotate(radians);
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &LoadedImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), SurfaceError> {
        let (surface_w, surface_h) = self.size();
        if surface_w == 0 || surface_h == 0 || image.is_empty() || width <= 0.0 || height <= 0.0 {
            return Ok(());
        }

        // A transform that collapses the plane draws nothing.
        let Some(inverse) = self.state.transform.invert() else {
            return Ok(());
        };

        let source = image.pixels();
        let scale_x = source.width() as f64 / width;
        let scale_y = source.height() as f64 / height;

        let mut layer = RgbaImage::new(surface_w, surface_h);
        for (px, py, out) in layer.enumerate_pixels_mut() {
            let (u, v) = inverse.apply(px as f64 + 0.5, py as f64 + 0.5);
            let (lx, ly) = (u - x, v - y);
            if lx < 0.0 || ly < 0.0 || lx >= width || ly >= height {
                continue;
            }
            *out = sample_bilinear(source, lx * scale_x - 0.5, ly * scale_y - 0.5);
        }

        apply_filter_chain(&mut layer, &self.state.filter);

        for (dst, src) in self.pixels.pixels_mut().zip(layer.pixels()) {
            *dst = source_over(*src, *dst);
        }

        trace!(
            "drew {}x{} image into {}x{} surface",
            source.width(),
            source.height(),
            surface_w,
            surface_h
        );
        Ok(())
    }

    fn snapshot(&self) -> Result<RgbaImage, SurfaceError> {
        Ok(self.pixels.clone())
    }
}

/// Porter-Duff source-over on unpremultiplied RGBA8.
#[inline]
fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => dst,
        255 => src,
        _ => {
            let sa = src[3] as f32 / 255.0;
            let da = dst[3] as f32 / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let mut out = [0u8; 4];
            for i in 0..3 {
                let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
                out[i] = c.clamp(0.0, 255.0).round() as u8;
            }
            out[3] = (out_a * 255.0).round() as u8;
            Rgba(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilterParam, FilterState};
    use std::f64::consts::PI;

    fn quad_image() -> LoadedImage {
        // 2x2: red, green / blue, white
        let mut px = RgbaImage::new(2, 2);
        px.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        px.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        px.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        px.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        LoadedImage::new(Vec::new(), px)
    }

    #[test]
    fn test_default_size_matches_fresh_canvas() {
        let surface = RasterSurface::default();
        assert_eq!(surface.size(), (300, 150));
        assert!(surface.is_blank().unwrap());
    }

    #[test]
    fn test_draw_identity() {
        let mut surface = RasterSurface::new(2, 2);
        surface.draw_image(&quad_image(), 0.0, 0.0, 2.0, 2.0).unwrap();

        assert_eq!(surface.pixels().get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(surface.pixels().get_pixel(1, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(surface.pixels().get_pixel(0, 1), &Rgba([0, 0, 255, 255]));
        assert_eq!(surface.pixels().get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_draw_outside_rect_stays_transparent() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&quad_image(), 0.0, 0.0, 2.0, 2.0).unwrap();

        assert_eq!(surface.pixels().get_pixel(3, 3), &Rgba([0, 0, 0, 0]));
        assert_eq!(surface.pixels().get_pixel(2, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_draw_scaled_down() {
        let img = LoadedImage::new(Vec::new(), RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255])));
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&img, 0.0, 0.0, 4.0, 4.0).unwrap();
        assert!(surface.pixels().pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_draw_rotated_half_turn_about_center() {
        let mut surface = RasterSurface::new(2, 2);
        surface.translate(1.0, 1.0).unwrap();
        surface.rotate(PI).unwrap();
        surface.draw_image(&quad_image(), -1.0, -1.0, 2.0, 2.0).unwrap();

        // Every pixel lands on the diagonally opposite corner
        assert_eq!(surface.pixels().get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(surface.pixels().get_pixel(1, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(surface.pixels().get_pixel(0, 1), &Rgba([0, 255, 0, 255]));
        assert_eq!(surface.pixels().get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_draw_applies_filter() {
        let img = LoadedImage::new(Vec::new(), RgbaImage::from_pixel(2, 2, Rgba([200, 200, 200, 255])));
        let mut surface = RasterSurface::new(2, 2);
        surface.set_filter(&FilterChain::from_state(&FilterState::initial()));
        surface.draw_image(&img, 0.0, 0.0, 2.0, 2.0).unwrap();
        assert_eq!(surface.pixels().get_pixel(1, 1), &Rgba([100, 100, 100, 255]));
    }

    #[test]
    fn test_filter_does_not_touch_existing_pixels() {
        let img = LoadedImage::new(Vec::new(), RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 255])));
        let mut surface = RasterSurface::new(2, 1);
        surface.draw_image(&img, 0.0, 0.0, 1.0, 1.0).unwrap();

        let state = FilterState::post_export().with(FilterParam::Brightness, 0.0);
        surface.set_filter(&FilterChain::from_state(&state));
        surface.draw_image(&img, 1.0, 0.0, 1.0, 1.0).unwrap();

        assert_eq!(surface.pixels().get_pixel(0, 0), &Rgba([200, 200, 200, 255]));
        assert_eq!(surface.pixels().get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_save_restore() {
        let mut surface = RasterSurface::new(10, 10);
        surface.save();
        surface.translate(5.0, 5.0).unwrap();
        surface.set_filter(&FilterChain::from_state(&FilterState::initial()));
        assert_eq!(surface.saved_states(), 1);

        surface.restore();
        assert!(surface.transform().is_identity());
        assert!(surface.filter().is_empty());
        assert_eq!(surface.saved_states(), 0);

        // Restoring an empty stack is a no-op
        surface.restore();
        assert!(surface.transform().is_identity());
    }

    #[test]
    fn test_resize_resets_everything() {
        let mut surface = RasterSurface::new(2, 2);
        surface.draw_image(&quad_image(), 0.0, 0.0, 2.0, 2.0).unwrap();
        surface.save();
        surface.translate(1.0, 1.0).unwrap();

        surface.resize(5, 3);
        assert_eq!(surface.size(), (5, 3));
        assert!(surface.is_blank().unwrap());
        assert!(surface.transform().is_identity());
        assert_eq!(surface.saved_states(), 0);
    }

    #[test]
    fn test_clear_keeps_size() {
        let mut surface = RasterSurface::new(2, 2);
        surface.draw_image(&quad_image(), 0.0, 0.0, 2.0, 2.0).unwrap();
        assert!(!surface.is_blank().unwrap());

        surface.clear();
        assert_eq!(surface.size(), (2, 2));
        assert!(surface.is_blank().unwrap());
    }

    #[test]
    fn test_draw_on_zero_sized_surface() {
        let mut surface = RasterSurface::new(0, 0);
        assert!(surface.draw_image(&quad_image(), 0.0, 0.0, 2.0, 2.0).is_ok());
    }

    #[test]
    fn test_source_over_blending() {
        let dst = Rgba([0, 0, 255, 255]);
        assert_eq!(source_over(Rgba([255, 0, 0, 255]), dst), Rgba([255, 0, 0, 255]));
        assert_eq!(source_over(Rgba([255, 0, 0, 0]), dst), dst);

        let half = source_over(Rgba([255, 0, 0, 128]), dst);
        assert_eq!(half[3], 255);
        assert!(half[0] > 120 && half[0] < 135);
        assert!(half[2] > 120 && half[2] < 135);
    }
}
