//! Drawing surfaces.
//!
//! A [`Surface`] is the 2D raster target the renderer draws on and the exporter
//! reads back. The trait mirrors the subset of the canvas 2D context the editor
//! uses, so a browser canvas and the in-memory [`RasterSurface`] are
//! interchangeable behind it.
//!
//! # State
//!
//! A surface carries a current transform and a current filter chain. `save`
//! pushes both onto a stack and `restore` pops them. `resize` resets the size,
//! clears every pixel and drops all state, like assigning a canvas's dimensions.

mod raster;
mod sample;

use image::RgbaImage;
use thiserror::Error;

use crate::decode::LoadedImage;
use crate::filters::FilterChain;

pub use raster::RasterSurface;

/// Errors reported by a drawing surface backend.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The backend rejected a drawing call.
    #[error("Drawing surface error: {0}")]
    Backend(String),

    /// Read-back produced a buffer that does not match the surface size.
    #[error("Surface snapshot mismatch: expected {expected} bytes, got {actual}")]
    SnapshotMismatch { expected: usize, actual: usize },
}

/// A 2D raster drawing target.
pub trait Surface {
    /// Backing store size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the backing store, clearing it and resetting transform, filter and state stack.
    fn resize(&mut self, width: u32, height: u32);

    /// Make every pixel transparent black. Size and state are kept.
    fn clear(&mut self);

    /// Set the filter chain used by subsequent draws.
    fn set_filter(&mut self, chain: &FilterChain);

    /// Push the current transform and filter.
    fn save(&mut self);

    /// Pop the most recently saved transform and filter. No-op on an empty stack.
    fn restore(&mut self);

    /// Move the origin of the current transform.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// Rotate the current transform clockwise by `radians`.
    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError>;

    /// Draw `image` scaled into the rectangle `(x, y, width, height)` of user space,
    /// through the current transform and filter.
    fn draw_image(
        &mut self,
        image: &LoadedImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), SurfaceError>;

    /// Read back the current contents as unpremultiplied RGBA.
    fn snapshot(&self) -> Result<RgbaImage, SurfaceError>;

    /// Check if every pixel is fully transparent.
    fn is_blank(&self) -> Result<bool, SurfaceError> {
        Ok(self.snapshot()?.pixels().all(|p| p[3] == 0))
    }
}
