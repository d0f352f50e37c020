//! Export of the current surface contents as an encoded file.

use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config::ExportFormat;
use crate::encode::{encode_jpeg, encode_png, EncodeError};
use crate::surface::{Surface, SurfaceError};

/// File name offered for download when the config does not override it.
pub const EXPORT_FILE_NAME: &str = "edited-image.png";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// An encoded export, ready to hand to a download trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedImage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Read back `surface` and encode it as `format`.
///
/// The surface is left untouched; clearing it afterwards is the caller's job.
/// A surface with no pixels exports as an empty file, the same way a browser
/// serializes a zero-sized canvas to `data:,`.
pub fn export_surface<S: Surface + ?Sized>(
    surface: &S,
    file_name: &str,
    format: ExportFormat,
) -> Result<ExportedImage, ExportError> {
    let pixels = surface.snapshot()?;
    let (width, height) = pixels.dimensions();

    if width == 0 || height == 0 {
        warn!("surface is {}x{}, exporting {} as an empty file", width, height, file_name);
        return Ok(ExportedImage {
            file_name: file_name.to_string(),
            mime_type: format.mime_type(),
            bytes: Vec::new(),
        });
    }

    let bytes = match format {
        ExportFormat::Png => encode_png(pixels.as_raw(), width, height)?,
        ExportFormat::Jpeg { quality } => encode_jpeg(pixels.as_raw(), width, height, quality)?,
    };

    info!(
        "exported {}x{} surface as {} ({} bytes)",
        width,
        height,
        file_name,
        bytes.len()
    );

    Ok(ExportedImage {
        file_name: file_name.to_string(),
        mime_type: format.mime_type(),
        bytes,
    })
}
