//! 2D affine transforms in canvas matrix form.
//!
//! A point `(x, y)` maps to:
//! ```text
//! x' = a * x + c * y + e
//! y' = b * x + d * y + f
//! ```
//! `translate` and `rotate` post-multiply, so they act in the current user
//! space exactly like the canvas methods of the same name.

/// An affine transform `[a c e; b d f; 0 0 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Move the origin of user space by `(tx, ty)`.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.e += self.a * tx + self.c * ty;
        self.f += self.b * tx + self.d * ty;
    }

    /// Rotate user space clockwise by `angle` radians around its origin.
    pub fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        let Transform2D { a, b, c, d, .. } = *self;
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    /// Map a point from user space to surface space.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse transform, or `None` if this one collapses the plane.
    pub fn invert(&self) -> Option<Transform2D> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Transform2D {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_point_eq(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identity() {
        let t = Transform2D::default();
        assert!(t.is_identity());
        assert_point_eq(t.apply(3.0, 4.0), (3.0, 4.0));
    }

    #[test]
    fn test_translate() {
        let mut t = Transform2D::IDENTITY;
        t.translate(10.0, 5.0);
        assert_point_eq(t.apply(1.0, 1.0), (11.0, 6.0));
    }

    #[test]
    fn test_rotate_quarter_turn_is_clockwise_on_screen() {
        let mut t = Transform2D::IDENTITY;
        t.rotate(PI / 2.0);
        // +x turns to +y (down the screen)
        assert_point_eq(t.apply(1.0, 0.0), (0.0, 1.0));
        assert_point_eq(t.apply(0.0, 1.0), (-1.0, 0.0));
    }

    #[test]
    fn test_translate_then_rotate_pivots_on_new_origin() {
        let mut t = Transform2D::IDENTITY;
        t.translate(50.0, 25.0);
        t.rotate(PI);
        assert_point_eq(t.apply(0.0, 0.0), (50.0, 25.0));
        assert_point_eq(t.apply(-50.0, -25.0), (100.0, 50.0));
    }

    #[test]
    fn test_invert_round_trip() {
        let mut t = Transform2D::IDENTITY;
        t.translate(12.5, -3.0);
        t.rotate(0.7);
        let inv = t.invert().unwrap();
        let (x, y) = t.apply(4.0, 9.0);
        assert_point_eq(inv.apply(x, y), (4.0, 9.0));
    }

    #[test]
    fn test_singular_transform_has_no_inverse() {
        let t = Transform2D {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 1.0,
            f: 1.0,
        };
        assert!(t.invert().is_none());
    }
}
