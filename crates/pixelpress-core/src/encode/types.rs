//! Error type and input validation shared by the encoders.

use thiserror::Error;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check that `pixels` is a non-empty RGBA8 buffer of `width * height` pixels.
pub(crate) fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(validate_rgba(&[0u8; 2 * 3 * 4], 2, 3).is_ok());
    }

    #[test]
    fn test_validate_zero_dimensions() {
        assert!(matches!(
            validate_rgba(&[], 0, 3),
            Err(EncodeError::InvalidDimensions { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_validate_wrong_length() {
        assert!(matches!(
            validate_rgba(&[0u8; 10], 2, 2),
            Err(EncodeError::InvalidPixelData { expected: 16, actual: 10 })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::InvalidDimensions { width: 0, height: 150 };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (150) must be non-zero"
        );
    }
}
