//! Rendering of the loaded image onto a drawing surface.
//!
//! # Render Sequence
//! 1. Fit the image into the bounding box
//! 2. Resize the surface to the fitted size (clears it and resets state)
//! 3. Set the composed filter chain
//! 4. Save state, translate to the surface center, rotate, draw centered, restore
//!
//! Every render starts again from the original decoded pixels, so filters never
//! stack on already-filtered output. The save/restore pair keeps the transform
//! from accumulating between renders.

use log::debug;

use crate::decode::{fit_within, BoundingBox, DisplayGeometry, LoadedImage};
use crate::filters::FilterChain;
use crate::surface::{Surface, SurfaceError};
use crate::transform::rotation_radians;
use crate::FilterState;

/// Render `image` with `filters` onto `surface`, fitted into `bounds`.
///
/// Returns the display geometry the image was drawn at.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    image: &LoadedImage,
    filters: &FilterState,
    bounds: BoundingBox,
) -> Result<DisplayGeometry, SurfaceError> {
    let geometry = fit_within(image.natural_width(), image.natural_height(), bounds);
    let (surface_w, surface_h) = geometry.surface_size();

    surface.resize(surface_w, surface_h);

    let chain = FilterChain::from_state(filters);
    surface.set_filter(&chain);

    surface.save();
    let drawn = draw_centered(
        surface,
        image,
        geometry,
        rotation_radians(filters.rotate()),
    );
    surface.restore();
    drawn?;

    debug!(
        "rendered {}x{} image at {}x{} with filter \"{}\" rotate {}",
        image.natural_width(),
        image.natural_height(),
        geometry.width,
        geometry.height,
        chain,
        filters.rotate()
    );
    Ok(geometry)
}

/// Draw `image` centered on the surface, rotated by `radians` about the center.
fn draw_centered<S: Surface + ?Sized>(
    surface: &mut S,
    image: &LoadedImage,
    geometry: DisplayGeometry,
    radians: f64,
) -> Result<(), SurfaceError> {
    let (surface_w, surface_h) = surface.size();
    surface.translate(surface_w as f64 / 2.0, surface_h as f64 / 2.0)?;
    surface.rotate(radians)?;
    surface.draw_image(
        image,
        -geometry.width / 2.0,
        -geometry.height / 2.0,
        geometry.width,
        geometry.height,
    )
}
