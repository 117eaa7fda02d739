//! Seed ray fans from a point source.

use planolux_math::Vector2D;
use planolux_trace::Ray;
use serde::{Deserialize, Serialize};

use crate::{Result, SceneError};

/// Parameters of a ray fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FanParams {
    /// Point every ray starts from.
    pub source: Vector2D,
    /// First angle, degrees from +X.
    pub start: f64,
    /// Last angle, degrees from +X.
    pub end: f64,
    /// Number of rays.
    pub count: usize,
    /// Include `end` itself (otherwise the range is half-open).
    #[serde(default = "default_endpoint")]
    pub endpoint: bool,
}

fn default_endpoint() -> bool {
    true
}

impl Default for FanParams {
    fn default() -> Self {
        Self {
            source: Vector2D::zero(),
            start: -180.0,
            end: 180.0,
            count: 60,
            endpoint: true,
        }
    }
}

impl FanParams {
    /// Build the fan.
    pub fn build(&self) -> Result<Vec<Ray>> {
        if !self.source.is_finite() || !self.start.is_finite() || !self.end.is_finite() {
            return Err(SceneError::InvalidFan("source and angles must be finite".into()));
        }
        Ok(ray_fan(self.source, self.start, self.end, self.count, self.endpoint))
    }
}

/// `count` unit-length rays from `source`, at angles evenly spaced from
/// `start` to `end` degrees.
///
/// With `endpoint` the last ray points exactly at `end`; without it the
/// spacing is `(end - start) / count` and `end` is not reached, which
/// avoids a duplicate ray for a full -180..180 sweep.
pub fn ray_fan(source: Vector2D, start: f64, end: f64, count: usize, endpoint: bool) -> Vec<Ray> {
    let step = match (count, endpoint) {
        (0, _) => return Vec::new(),
        (1, true) => 0.0,
        (n, true) => (end - start) / (n - 1) as f64,
        (n, false) => (end - start) / n as f64,
    };

    (0..count)
        .map(|i| {
            let angle = if endpoint && i == count - 1 && count > 1 {
                end
            } else {
                start + step * i as f64
            };
            let dir = Vector2D::from_angle(angle.to_radians());
            Ray::new(source, source.add(dir))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn angle_deg(r: &Ray) -> f64 {
        let d = r.direction();
        d.y.atan2(d.x).to_degrees()
    }

    #[test]
    fn test_fan_with_endpoint() {
        let rays = ray_fan(Vector2D::zero(), -30.0, 30.0, 5, true);
        assert_eq!(rays.len(), 5);
        let angles: Vec<f64> = rays.iter().map(angle_deg).collect();
        for (got, want) in angles.iter().zip([-30.0, -15.0, 0.0, 15.0, 30.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fan_without_endpoint() {
        let rays = ray_fan(Vector2D::zero(), -180.0, 180.0, 4, false);
        assert_eq!(rays.len(), 4);
        let expected = [(-1.0, 0.0), (0.0, -1.0), (1.0, 0.0), (0.0, 1.0)];
        for (ray, (x, y)) in rays.iter().zip(expected) {
            let d = ray.direction();
            assert_abs_diff_eq!(d.x, x, epsilon = 1e-12);
            assert_abs_diff_eq!(d.y, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fan_unit_length_from_source() {
        let source = Vector2D::new(2.0, -1.0);
        for ray in ray_fan(source, 0.0, 90.0, 7, true) {
            assert_eq!(ray.origin, source);
            assert_abs_diff_eq!(ray.length(), 1.0, epsilon = 1e-12);
            assert_eq!(ray.intensity, 1.0);
        }
    }

    #[test]
    fn test_fan_degenerate_counts() {
        assert!(ray_fan(Vector2D::zero(), 0.0, 90.0, 0, true).is_empty());
        let one = ray_fan(Vector2D::zero(), 45.0, 90.0, 1, true);
        assert_eq!(one.len(), 1);
        assert_abs_diff_eq!(angle_deg(&one[0]), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fan_params_defaults() {
        let rays = FanParams::default().build().unwrap();
        assert_eq!(rays.len(), 60);
    }

    #[test]
    fn test_fan_params_rejects_nan() {
        let params = FanParams {
            start: f64::NAN,
            ..Default::default()
        };
        assert!(params.build().is_err());
    }
}
