//! Ray representation.

use planolux_math::{MathError, Vector2D};
use serde::{Deserialize, Serialize};

/// A directed, finite ray segment carrying an energy weight.
///
/// The segment runs from `origin` to `endpoint`. For intersection purposes
/// the ray is treated as a half-line through both points; the endpoint only
/// fixes the direction and the length drawn when nothing is hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Start of the segment.
    pub origin: Vector2D,
    /// End of the segment.
    pub endpoint: Vector2D,
    /// Fraction of the seed energy carried, in `[0, 1]`.
    #[serde(default = "full_intensity")]
    pub intensity: f64,
}

fn full_intensity() -> f64 {
    1.0
}

impl Ray {
    /// Create a ray at full intensity.
    pub fn new(origin: Vector2D, endpoint: Vector2D) -> Self {
        Self {
            origin,
            endpoint,
            intensity: 1.0,
        }
    }

    /// Copy of this ray with a different intensity.
    pub fn with_intensity(self, intensity: f64) -> Self {
        Self { intensity, ..self }
    }

    /// `endpoint - origin`.
    #[inline]
    pub fn direction(&self) -> Vector2D {
        self.endpoint.sub(self.origin)
    }

    /// Normalized direction. Fails for a zero-length ray.
    pub fn unit_direction(&self) -> Result<Vector2D, MathError> {
        self.direction().normalize()
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.direction().magnitude()
    }

    /// Point at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Vector2D {
        self.origin.add(self.direction().scale(t))
    }

    /// New ray from the same origin ending at `point`, same intensity.
    pub fn truncated_at(&self, point: Vector2D) -> Self {
        Self {
            origin: self.origin,
            endpoint: point,
            intensity: self.intensity,
        }
    }

    /// True if both end points and the intensity are finite.
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.endpoint.is_finite() && self.intensity.is_finite()
    }
}

impl std::fmt::Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} [{:.4}]", self.origin, self.endpoint, self.intensity)
    }
}
