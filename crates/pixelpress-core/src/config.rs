//! Editor configuration.
//!
//! There is no config file; hosts build an [`EditorConfig`] in code (or pass a
//! plain object across the WASM boundary) and any omitted field keeps its default.

use serde::{Deserialize, Serialize};

use crate::decode::BoundingBox;
use crate::export::EXPORT_FILE_NAME;

/// Encoded format produced on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless PNG, the drawing surface's default export format.
    #[default]
    Png,
    /// JPEG with the given quality (1-100).
    Jpeg { quality: u8 },
}

impl ExportFormat {
    /// MIME type of the encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Settings for an editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum display width in pixels
    pub max_width: f64,
    /// Maximum display height in pixels
    pub max_height: f64,
    /// File name offered for the exported image
    pub file_name: String,
    /// Encoding used on save
    pub format: ExportFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_width: BoundingBox::DEFAULT.max_width,
            max_height: BoundingBox::DEFAULT.max_height,
            file_name: EXPORT_FILE_NAME.to_string(),
            format: ExportFormat::Png,
        }
    }
}

impl EditorConfig {
    /// The display bounding box described by this config.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.max_width, self.max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.max_width, 500.0);
        assert_eq!(config.max_height, 500.0);
        assert_eq!(config.file_name, "edited-image.png");
        assert_eq!(config.format, ExportFormat::Png);
        assert_eq!(config.bounds(), BoundingBox::DEFAULT);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Jpeg { quality: 90 }.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let value = serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
            std::iter::empty::<(String, String)>(),
        );
        let config = EditorConfig::deserialize(value).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_custom_bounds() {
        let config = EditorConfig {
            max_width: 800.0,
            max_height: 600.0,
            ..Default::default()
        };
        assert_eq!(config.bounds(), BoundingBox::new(800.0, 600.0));
    }
}
