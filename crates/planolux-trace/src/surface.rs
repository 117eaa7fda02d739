//! Oriented line-segment surfaces.

use planolux_math::{MathError, Vector2D};
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Default index on the side the normal points into.
pub const DEFAULT_N1: f64 = 1.0;
/// Default index behind the normal.
pub const DEFAULT_N2: f64 = 1.5;

/// An oriented segment from `a` to `b` separating two media.
///
/// The normal is `(dy, -dx)` of `b - a`: walking from `a` to `b` it points
/// to the right. A ray travelling against the normal crosses from `n1` into
/// `n2`; a ray travelling along it crosses from `n2` into `n1`. With the
/// defaults and an outward normal this is air outside, glass inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Start vertex.
    pub a: Vector2D,
    /// End vertex.
    pub b: Vector2D,
    /// Refractive index on the normal's side.
    #[serde(default = "default_n1")]
    pub n1: f64,
    /// Refractive index on the opposite side.
    #[serde(default = "default_n2")]
    pub n2: f64,
}

fn default_n1() -> f64 {
    DEFAULT_N1
}

fn default_n2() -> f64 {
    DEFAULT_N2
}

impl Surface {
    /// Surface with the default air/glass indices.
    pub fn new(a: Vector2D, b: Vector2D) -> Self {
        Self::with_indices(a, b, DEFAULT_N1, DEFAULT_N2)
    }

    /// Surface with explicit indices.
    pub fn with_indices(a: Vector2D, b: Vector2D, n1: f64, n2: f64) -> Self {
        Self { a, b, n1, n2 }
    }

    /// `b - a`.
    #[inline]
    pub fn direction(&self) -> Vector2D {
        self.b.sub(self.a)
    }

    /// Unit normal, rotated 90° clockwise from the direction.
    pub fn normal(&self) -> Result<Vector2D, MathError> {
        self.direction().perpendicular_cw().normalize()
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.direction().magnitude()
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Vector2D {
        self.a.midpoint(self.b)
    }

    /// A short display ray from `point` along the normal.
    pub fn normal_ray_at(&self, point: Vector2D, length: f64) -> Result<Ray, MathError> {
        let n = self.normal()?;
        Ok(Ray::new(point, point.add(n.scale(length))))
    }

    /// The same interface with the opposite orientation.
    ///
    /// Swapping the vertices flips the normal, so the indices swap too.
    pub fn flipped(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            n1: self.n2,
            n2: self.n1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_points_right_of_travel() {
        // Upward segment: right of travel is +X
        let s = Surface::new(Vector2D::new(0.0, -1.0), Vector2D::new(0.0, 1.0));
        let n = s.normal().unwrap();
        assert!((n.x - 1.0).abs() < 1e-12);
        assert!(n.y.abs() < 1e-12);

        // Rightward segment: right of travel is -Y
        let s = Surface::new(Vector2D::new(-1.0, 0.0), Vector2D::new(1.0, 0.0));
        let n = s.normal().unwrap();
        assert!(n.x.abs() < 1e-12);
        assert!((n.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normal_is_unit() {
        let s = Surface::new(Vector2D::new(0.3, 0.1), Vector2D::new(4.0, -2.0));
        let n = s.normal().unwrap();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);
        assert!(n.dot(s.direction()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_surface_normal() {
        let p = Vector2D::new(2.0, 2.0);
        let s = Surface::new(p, p);
        assert_eq!(s.normal(), Err(MathError::ZeroLength));
    }

    #[test]
    fn test_normal_ray_at() {
        let s = Surface::new(Vector2D::new(-1.0, 0.0), Vector2D::new(1.0, 0.0));
        let r = s.normal_ray_at(s.midpoint(), 0.25).unwrap();
        assert_eq!(r.origin, Vector2D::zero());
        assert!((r.endpoint.y + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_flipped() {
        let s = Surface::with_indices(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0), 1.0, 1.33);
        let f = s.flipped();
        assert_eq!(f.a, s.b);
        assert_eq!(f.n1, 1.33);
        let (n, nf) = (s.normal().unwrap(), f.normal().unwrap());
        assert!((n.add(nf)).magnitude() < 1e-12);
    }
}
