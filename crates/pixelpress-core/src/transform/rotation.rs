//! Mapping of the rotate slider onto a rotation angle.
//!
//! The slider value is divided by 360 rather than 180 when converted to
//! radians, so the visible rotation is half the slider value: the full slider
//! travel of 360 turns the image by 180 degrees. This mapping is kept as-is;
//! exported images depend on it.

use std::f64::consts::PI;

/// Convert a rotate slider value into the angle passed to the surface.
///
/// Computes `rotate * PI / 360`.
#[inline]
pub fn rotation_radians(rotate: f64) -> f64 {
    rotate * PI / 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rotation() {
        assert_eq!(rotation_radians(0.0), 0.0);
    }

    #[test]
    fn test_full_slider_is_half_turn() {
        // 360 on the slider rotates by PI (180 degrees), not a full turn
        assert!((rotation_radians(360.0) - PI).abs() < 1e-12);
        assert!((rotation_radians(360.0).to_degrees() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_slider_180_is_quarter_turn() {
        assert!((rotation_radians(180.0) - PI / 2.0).abs() < 1e-12);
        assert!((rotation_radians(180.0).to_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_mapping_is_linear() {
        let a = rotation_radians(45.0);
        let b = rotation_radians(90.0);
        assert!((b - 2.0 * a).abs() < 1e-12);
    }
}
