use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::Point;

/// A 2D affine transform in canvas coefficient order.
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// Every operation returns a new matrix. The builder-style methods
/// ([`translate`](Self::translate), [`scale`](Self::scale),
/// [`rotate`](Self::rotate)) post-multiply, matching the canvas API: the new
/// step acts in the current local space and is applied to points first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Counter-clockwise rotation by `theta` radians (clockwise on a y-down screen).
    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self × other`: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Affine {
        self.compose(&Self::translation(dx, dy))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Affine {
        self.compose(&Self::scaling(sx, sy))
    }

    /// Rotate about the local origin.
    pub fn rotate(&self, theta: f64) -> Affine {
        self.compose(&Self::rotation(theta))
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Fails with [`CoreError::SingularMatrix`] unless the determinant is a
    /// normal (non-zero, non-subnormal, finite) float.
    pub fn invert(&self) -> crate::Result<Affine> {
        let det = self.ensure_invertible()?;
        Ok(Affine {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Return the determinant if the matrix can be inverted.
    pub fn ensure_invertible(&self) -> crate::Result<f64> {
        let determinant = self.determinant();
        if determinant.is_normal() {
            Ok(determinant)
        } else {
            Err(CoreError::SingularMatrix { determinant })
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Apply only the linear part (no translation), for mapping deltas.
    #[inline]
    pub fn apply_vector(&self, v: Point) -> Point {
        Point::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    pub fn apply_inverse(&self, p: Point) -> crate::Result<Point> {
        Ok(self.invert()?.apply(p))
    }

    /// Coefficient-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Affine, eps: f64) -> bool {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.e - other.e,
            self.f - other.f,
        ]
        .iter()
        .all(|diff| diff.abs() < eps)
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, rhs: Affine) -> Affine {
        self.compose(&rhs)
    }
}
