//! Core types for image loading.

use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image loading operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is empty or its format is not recognized.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// An uploaded image: the original file bytes plus its decoded pixels.
///
/// A `LoadedImage` never changes after construction. A new upload produces a new
/// value (with a new [`LoadedImage::id`]) that replaces the old one wholesale.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    id: u64,
    source: Vec<u8>,
    pixels: RgbaImage,
}

impl LoadedImage {
    /// Wrap decoded RGBA pixels together with the bytes they were decoded from.
    pub fn new(source: Vec<u8>, pixels: RgbaImage) -> Self {
        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            source,
            pixels,
        }
    }

    /// Identifier unique to this load within the process.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The file bytes as uploaded.
    pub fn source_bytes(&self) -> &[u8] {
        &self.source
    }

    /// Decoded RGBA pixels, orientation already applied.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Width as the image presents itself, after orientation.
    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height as the image presents itself, after orientation.
    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn natural_size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }
}
