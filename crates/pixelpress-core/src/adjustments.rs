//! Pixel-level evaluation of filter chains.
//!
//! Applies the effects of a [`FilterChain`] to RGBA pixel data, following the
//! Filter Effects formulas a browser uses for the CSS filter functions of the
//! same name. Color effects work on unpremultiplied sRGB channel values in
//! `0.0..=1.0` and clamp after every step; alpha is left untouched.
//!
//! ## Effects
//! - Brightness: `C' = C * amount`
//! - Contrast: `C' = (C - 0.5) * amount + 0.5`
//! - Grayscale: luminance matrix (BT.709) mixed by `amount`
//! - Blur: Gaussian blur with a standard deviation of `amount` pixels

use image::{imageops, Rgba, RgbaImage};

use crate::filters::{FilterChain, FilterEffect, FilterKind};

/// ITU-R BT.709 luminance coefficients
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Apply a filter chain to an image in place.
///
/// Effects run in chain order. Consecutive color effects share one pass over
/// the pixels so no precision is lost between them.
///
/// # Example
/// ```
/// use image::{Rgba, RgbaImage};
/// use pixelpress_core::{adjustments::apply_filter_chain, FilterChain, FilterState};
///
/// let mut image = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 255]));
/// apply_filter_chain(&mut image, &FilterChain::from_state(&FilterState::initial()));
/// // Initial brightness of 50% halves each channel
/// assert_eq!(image.get_pixel(0, 0), &Rgba([100, 100, 100, 255]));
/// ```
pub fn apply_filter_chain(image: &mut RgbaImage, chain: &FilterChain) {
    // Early exit if no effect changes anything
    if chain.is_identity() {
        return;
    }

    let mut pending: Vec<FilterEffect> = Vec::with_capacity(chain.len());
    for effect in chain.iter().filter(|e| !e.is_identity()) {
        match effect.kind {
            FilterKind::Blur => {
                apply_color_effects(image, &pending);
                pending.clear();
                apply_blur(image, effect.amount as f32);
            }
            _ => pending.push(*effect),
        }
    }
    apply_color_effects(image, &pending);
}

/// Run a sequence of per-pixel color effects in a single pass.
fn apply_color_effects(image: &mut RgbaImage, effects: &[FilterEffect]) {
    if effects.is_empty() {
        return;
    }

    for chunk in image.chunks_exact_mut(4) {
        let mut r = chunk[0] as f32 / 255.0;
        let mut g = chunk[1] as f32 / 255.0;
        let mut b = chunk[2] as f32 / 255.0;

        for effect in effects {
            let amount = effect.factor() as f32;
            (r, g, b) = match effect.kind {
                FilterKind::Brightness => apply_brightness(r, g, b, amount),
                FilterKind::Contrast => apply_contrast(r, g, b, amount),
                FilterKind::Grayscale => apply_grayscale(r, g, b, amount),
                FilterKind::Blur => (r, g, b),
            };
        }

        chunk[0] = to_u8(r);
        chunk[1] = to_u8(g);
        chunk[2] = to_u8(b);
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Apply brightness.
///
/// `amount` is a multiplier: 0 is black, 1 leaves the pixel unchanged.
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    (
        (r * amount).clamp(0.0, 1.0),
        (g * amount).clamp(0.0, 1.0),
        (b * amount).clamp(0.0, 1.0),
    )
}

/// Apply contrast around the 0.5 midpoint.
///
/// `amount` of 0 turns every channel mid gray, 1 leaves the pixel unchanged.
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    let intercept = 0.5 - 0.5 * amount;
    (
        (r * amount + intercept).clamp(0.0, 1.0),
        (g * amount + intercept).clamp(0.0, 1.0),
        (b * amount + intercept).clamp(0.0, 1.0),
    )
}

/// Apply grayscale conversion.
///
/// `amount` is clamped to `0.0..=1.0`; 1 is fully gray.
#[inline]
fn apply_grayscale(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    let s = 1.0 - amount.clamp(0.0, 1.0);
    let r2 = (LUMA_R + (1.0 - LUMA_R) * s) * r + (LUMA_G - LUMA_G * s) * g + (LUMA_B - LUMA_B * s) * b;
    let g2 = (LUMA_R - LUMA_R * s) * r + (LUMA_G + (1.0 - LUMA_G) * s) * g + (LUMA_B - LUMA_B * s) * b;
    let b2 = (LUMA_R - LUMA_R * s) * r + (LUMA_G - LUMA_G * s) * g + (LUMA_B + (1.0 - LUMA_B) * s) * b;
    (r2.clamp(0.0, 1.0), g2.clamp(0.0, 1.0), b2.clamp(0.0, 1.0))
}

/// Apply a Gaussian blur with standard deviation `sigma` pixels.
///
/// Color is blurred premultiplied by alpha so transparent neighbours do not
/// darken the edges of opaque content.
fn apply_blur(image: &mut RgbaImage, sigma: f32) {
    if sigma <= 0.0 || image.width() == 0 || image.height() == 0 {
        return;
    }

    for pixel in image.pixels_mut() {
        *pixel = premultiply(*pixel);
    }

    let mut blurred = imageops::blur(&*image, sigma);

    for pixel in blurred.pixels_mut() {
        *pixel = unpremultiply(*pixel);
    }

    *image = blurred;
}

#[inline]
fn premultiply(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
    let scale = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
    Rgba([scale(r), scale(g), scale(b), a])
}

#[inline]
fn unpremultiply(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let scale = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
    Rgba([scale(r), scale(g), scale(b), a])
}
