//! Affine maps from glyph space onto the page.

use crate::units::Px;

/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
///
/// The page is y-down, so a positive angle turns clockwise. Maps compose left
/// to right: `p.then(q)` applies `p` first.
///
/// ```
/// use handwrite_gen::{Px, Transform};
///
/// // glyph units at 1/2 scale, placed at (72, 72)
/// let place = Transform::scale(0.5, 0.5).with_translate(Px(72.0), Px(72.0));
/// assert_eq!(place.apply(10.0, 10.0), (77.0, 77.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform::matrix(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    const fn matrix(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Transform {
        Transform { a, b, c, d, e, f }
    }

    pub fn translate(x: Px, y: Px) -> Transform {
        Transform::matrix(1.0, 0.0, 0.0, 1.0, *x, *y)
    }

    pub fn scale(sx: f32, sy: f32) -> Transform {
        Transform::matrix(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin
    pub fn rotate_degrees(degrees: f32) -> Transform {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Transform::matrix(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self`, followed by `next`
    pub fn then(self, next: Transform) -> Transform {
        Transform::matrix(
            self.a * next.a + self.b * next.c,
            self.a * next.b + self.b * next.d,
            self.c * next.a + self.d * next.c,
            self.c * next.b + self.d * next.d,
            self.e * next.a + self.f * next.c + next.e,
            self.e * next.b + self.f * next.d + next.f,
        )
    }

    pub fn with_translate(self, x: Px, y: Px) -> Transform {
        self.then(Transform::translate(x, y))
    }

    pub fn with_rotate_degrees(self, degrees: f32) -> Transform {
        self.then(Transform::rotate_degrees(degrees))
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}
