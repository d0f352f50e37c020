//! Image loading for Pixelpress.
//!
//! This module provides functionality for:
//! - Decoding an uploaded file (PNG, JPEG, GIF, WebP, BMP, ICO) into RGBA pixels
//! - Applying EXIF orientation the way a browser does for `<img>` sources
//! - Computing the display geometry that fits an image inside a bounding box
//!
//! # Architecture
//!
//! Decoding is synchronous. In the browser the host reads the `File` asynchronously
//! and hands the bytes over once they are available; see [`crate::editor`] for how
//! overlapping loads are ordered.
//!
//! # Examples
//!
//! ```ignore
//! use pixelpress_core::decode::{decode_image, fit_within, BoundingBox};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let geometry = fit_within(image.natural_width(), image.natural_height(), BoundingBox::DEFAULT);
//! println!("Display at {}x{}", geometry.width, geometry.height);
//! ```

mod fit;
mod loader;
mod types;

pub use loader::decode_image;
pub use fit::{fit_within, BoundingBox, DisplayGeometry};
pub use types::{DecodeError, LoadedImage, Orientation};
