#![warn(missing_docs)]

//! Math types for the planolux ray tracer.
//!
//! A thin wrapper around nalgebra's `Vector2<f64>`, used both as a point
//! and as a free vector, with explicit named operations, plus tolerance
//! helpers for geometric comparisons.

use std::ops::{Add, Deref, Mul, Neg, Sub};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by vector math.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// Attempted to normalize a vector whose magnitude is exactly zero.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    /// The magnitude overflowed or a component is NaN.
    #[error("vector length is not finite")]
    NonFinite,
}

/// A point or free vector in the plane.
///
/// Derefs to the underlying nalgebra vector, so `v.x` and `v.y` read the
/// components directly. Serializes as `{ x, y }`.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Xy", into = "Xy")]
pub struct Vector2D(Vector2<f64>);

#[derive(Serialize, Deserialize)]
#[serde(rename = "Vector2D")]
struct Xy {
    x: f64,
    y: f64,
}

impl From<Xy> for Vector2D {
    fn from(v: Xy) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for Xy {
    fn from(v: Vector2D) -> Self {
        Xy { x: v.x, y: v.y }
    }
}

impl Vector2D {
    /// Create a vector from its components.
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }

    /// The zero vector (also the origin).
    pub fn zero() -> Self {
        Self(Vector2::zeros())
    }

    /// Unit vector at `angle` radians from the +X axis.
    pub fn from_angle(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s)
    }

    /// Component-wise sum.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }

    /// Multiply both components by `s`.
    #[inline]
    pub fn scale(self, s: f64) -> Self {
        Self(self.0 * s)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// 2D pseudo-cross product `x1*y2 - y1*x2`.
    ///
    /// Positive when `other` is counter-clockwise from `self`.
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.0.perp(&other.0)
    }

    /// Euclidean length.
    ///
    /// Computed with `hypot`; `norm()` squares the components and
    /// overflows to infinity for coordinates past ~1e154.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.0.x.hypot(self.0.y)
    }

    /// Unit vector in the same direction.
    ///
    /// Fails with [`MathError::ZeroLength`] for the zero vector and with
    /// [`MathError::NonFinite`] when the length is infinite or NaN, instead
    /// of silently producing zero or NaN components.
    pub fn normalize(self) -> Result<Self, MathError> {
        let m = self.magnitude();
        if m == 0.0 {
            return Err(MathError::ZeroLength);
        }
        if !m.is_finite() {
            return Err(MathError::NonFinite);
        }
        Ok(Self(self.0.unscale(m)))
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> f64 {
        self.sub(other).magnitude()
    }

    /// Rotate 90° clockwise: `(x, y) -> (y, -x)`.
    pub fn perpendicular_cw(self) -> Self {
        Self::new(self.0.y, -self.0.x)
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Self) -> Self {
        self.add(other).scale(0.5)
    }

    /// True if both components are finite.
    pub fn is_finite(self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Default for Vector2D {
    fn default() -> Self {
        Self::zero()
    }
}

impl Deref for Vector2D {
    type Target = Vector2<f64>;

    fn deref(&self) -> &Vector2<f64> {
        &self.0
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2D::add(self, rhs)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Vector2D::sub(self, rhs)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<Vector2<f64>> for Vector2D {
    fn from(v: Vector2<f64>) -> Self {
        Self(v)
    }
}

impl From<Vector2D> for Vector2<f64> {
    fn from(v: Vector2D) -> Self {
        v.0
    }
}

impl std::fmt::Debug for Vector2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector2D")
            .field("x", &self.0.x)
            .field("y", &self.0.y)
            .finish()
    }
}

impl std::fmt::Display for Vector2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2},{:.2})", self.0.x, self.0.y)
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 linear).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: Vector2D, b: Vector2D) -> bool {
        a.distance(b) < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_named_arithmetic() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -4.0);
        assert_eq!(a.add(b), Vector2D::new(4.0, -2.0));
        assert_eq!(a.sub(b), Vector2D::new(-2.0, 6.0));
        assert_eq!(a.scale(2.5), Vector2D::new(2.5, 5.0));
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.sub(b));
        assert_eq!(a * 2.5, a.scale(2.5));
        assert_eq!(-a, Vector2D::new(-1.0, -2.0));
    }

    #[test]
    fn test_dot_cross() {
        let x = Vector2D::new(1.0, 0.0);
        let y = Vector2D::new(0.0, 1.0);
        assert_eq!(x.dot(y), 0.0);
        assert_eq!(x.cross(y), 1.0);
        assert_eq!(y.cross(x), -1.0);
        assert_eq!(Vector2D::new(2.0, 3.0).dot(Vector2D::new(4.0, 5.0)), 23.0);
    }

    #[test]
    fn test_magnitude_normalize() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        let n = v.normalize().unwrap();
        assert_abs_diff_eq!(n.x, 0.6, epsilon = 1e-15);
        assert_abs_diff_eq!(n.y, 0.8, epsilon = 1e-15);
        assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_normalize_zero_fails() {
        assert_eq!(Vector2D::zero().normalize(), Err(MathError::ZeroLength));
    }

    #[test]
    fn test_normalize_tiny_vector() {
        // Small but representable magnitude still normalizes
        let v = Vector2D::new(1e-150, 0.0);
        assert!(v.normalize().is_ok());
    }

    #[test]
    fn test_large_coordinates_do_not_overflow() {
        let v = Vector2D::new(3e200, 4e200);
        assert_abs_diff_eq!(v.magnitude() / 5e200, 1.0, epsilon = 1e-15);
        let n = v.normalize().unwrap();
        assert_abs_diff_eq!(n.x, 0.6, epsilon = 1e-15);
        assert_abs_diff_eq!(n.y, 0.8, epsilon = 1e-15);
    }

    #[test]
    fn test_normalize_non_finite_fails() {
        let huge = Vector2D::new(f64::MAX, f64::MAX);
        assert_eq!(huge.normalize(), Err(MathError::NonFinite));
        let nan = Vector2D::new(f64::NAN, 1.0);
        assert_eq!(nan.normalize(), Err(MathError::NonFinite));
        let inf = Vector2D::new(f64::INFINITY, 0.0);
        assert_eq!(inf.normalize(), Err(MathError::NonFinite));
    }

    #[test]
    fn test_perpendicular_cw() {
        let v = Vector2D::new(0.0, 1.0);
        assert_eq!(v.perpendicular_cw(), Vector2D::new(1.0, 0.0));
    }

    #[test]
    fn test_from_angle() {
        let v = Vector2D::from_angle(PI);
        assert!((v.x + 1.0).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
    }

    #[test]
    fn test_nalgebra_interop() {
        let v = Vector2D::new(1.5, -2.5);
        let na: Vector2<f64> = v.into();
        assert_eq!(Vector2D::from(na), v);
        assert_eq!(v.norm_squared(), v.dot(v));
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Vector2D::new(1.0, 2.0);
        assert!(tol.points_equal(a, Vector2D::new(1.0 + 1e-12, 2.0)));
        assert!(!tol.points_equal(a, Vector2D::new(1.001, 2.0)));
        assert!(tol.is_zero(1e-10));
        assert!(!tol.is_zero(1e-6));
    }
}
