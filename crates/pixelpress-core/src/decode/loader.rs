//! Decoding uploaded files with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use log::debug;

use super::{DecodeError, LoadedImage, Orientation};

/// Decode an uploaded image file into a [`LoadedImage`].
///
/// The format is sniffed from the file contents, so the file name or MIME type
/// never matters. EXIF orientation is applied so that the natural size matches
/// what a browser reports for the same file.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are empty or not a recognized
/// image format, and `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgba = apply_orientation(img, orientation).into_rgba8();
    debug!(
        "decoded {:?} image {}x{} ({:?})",
        format,
        rgba.width(),
        rgba.height(),
        orientation
    );

    Ok(LoadedImage::new(bytes.to_vec(), rgba))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn encode_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 10) as u8, (y * 10) as u8, 128, 255])
        });
        let mut buffer = Cursor::new(Vec::new());
        let dynamic = DynamicImage::ImageRgba8(img);
        match format {
            // JPEG has no alpha channel
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(dynamic.to_rgb8())
                .write_to(&mut buffer, format)
                .unwrap(),
            _ => dynamic.write_to(&mut buffer, format).unwrap(),
        }
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode_test_image(12, 7, ImageFormat::Png);
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.natural_size(), (12, 7));
        assert_eq!(img.source_bytes(), bytes.as_slice());
        assert_eq!(img.pixels().get_pixel(3, 2), &Rgba([30, 20, 128, 255]));
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encode_test_image(16, 8, ImageFormat::Jpeg);
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.natural_size(), (16, 8));
        // JPEG decodes as opaque
        assert_eq!(img.pixels().get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_decode_bmp() {
        let bytes = encode_test_image(5, 5, ImageFormat::Bmp);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.natural_size(), (5, 5));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        let result = decode_image(&[]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode_test_image(32, 32, ImageFormat::Png);
        let result = decode_image(&bytes[..40]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = encode_test_image(4, 4, ImageFormat::Png);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(6, 3));
        let rotated = apply_orientation(img.clone(), Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (3, 6));

        let flipped = apply_orientation(img, Orientation::FlipHorizontal);
        assert_eq!((flipped.width(), flipped.height()), (6, 3));
    }
}
