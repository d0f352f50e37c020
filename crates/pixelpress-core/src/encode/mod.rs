//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding RGBA surface contents to PNG (the default export format)
//! - Encoding RGBA surface contents to JPEG with configurable quality
//!
//! Both encoders take the straight (unpremultiplied) RGBA8 pixels a surface
//! snapshot produces.
//!
//! # Examples
//!
//! ```ignore
//! use pixelpress_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray, half transparent
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod jpeg;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::EncodeError;

pub(crate) use types::validate_rgba;
