//! Polygonal biconvex lenses.

use planolux_math::Vector2D;
use planolux_trace::Surface;
use serde::{Deserialize, Serialize};

use crate::{Result, SceneError};

/// Shape of a biconvex lens centred on the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensParams {
    /// Radius of curvature of the right (+X) face.
    pub r1: f64,
    /// Radius of curvature of the left (-X) face.
    pub r2: f64,
    /// Centre thickness.
    pub thickness: f64,
    /// Half of the lens aperture.
    pub half_height: f64,
    /// X coordinate of the lens centre.
    #[serde(default)]
    pub x: f64,
    /// Points per face.
    #[serde(default = "default_segments")]
    pub segments: usize,
}

fn default_segments() -> usize {
    16
}

impl Default for LensParams {
    fn default() -> Self {
        Self {
            r1: 5.0,
            r2: 5.0,
            thickness: 1.0,
            half_height: 2.0,
            x: 0.0,
            segments: default_segments(),
        }
    }
}

impl LensParams {
    /// Check the parameters describe a buildable lens.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("r1", self.r1),
            ("r2", self.r2),
            ("thickness", self.thickness),
            ("half_height", self.half_height),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidLens(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.x.is_finite() {
            return Err(SceneError::InvalidLens("x must be finite".into()));
        }
        if self.segments < 2 {
            return Err(SceneError::InvalidLens(format!(
                "segments must be at least 2, got {}",
                self.segments
            )));
        }
        if self.half_height > self.r1 || self.half_height > self.r2 {
            return Err(SceneError::InvalidLens(format!(
                "half_height {} exceeds a face radius",
                self.half_height
            )));
        }
        let edge = self.edge_thickness();
        if edge <= 0.0 {
            return Err(SceneError::InvalidLens(format!(
                "faces meet or cross (edge thickness {edge:.4})"
            )));
        }
        Ok(())
    }

    /// Thickness of the lens at `half_height`.
    pub fn edge_thickness(&self) -> f64 {
        self.thickness - sag(self.r1, self.half_height) - sag(self.r2, self.half_height)
    }
}

/// Depth of a circular arc of radius `r` over a half-chord `h`.
fn sag(r: f64, h: f64) -> f64 {
    r - (r * r - h * h).max(0.0).sqrt()
}

/// Points on an arc of `radius` around `centre`, `n` of them, spanning
/// `-half_angle..=half_angle`. A negative radius mirrors the arc.
fn arc(centre: Vector2D, radius: f64, half_angle: f64, n: usize) -> Vec<Vector2D> {
    let step = 2.0 * half_angle / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let theta = -half_angle + step * i as f64;
            centre.add(Vector2D::from_angle(theta).scale(radius))
        })
        .collect()
}

/// Build the closed outline of a lens.
///
/// Faces are wound so every normal points out of the glass; surfaces use
/// the default indices (air outside, glass inside). The result has
/// `2 * (segments - 1) + 2` surfaces: right face, left face, then the
/// bottom and top edges.
pub fn lens(params: &LensParams) -> Result<Vec<Surface>> {
    params.validate()?;
    let LensParams {
        r1,
        r2,
        thickness: t,
        half_height: h,
        x,
        segments: n,
    } = *params;

    let front = arc(
        Vector2D::new(x - r1 + t / 2.0, 0.0),
        r1,
        (h / r1).asin(),
        n,
    );
    let back = arc(
        Vector2D::new(x + r2 - t / 2.0, 0.0),
        -r2,
        (h / r2).asin(),
        n,
    );

    let mut surfaces = Vec::with_capacity(2 * n);
    for face in [&front, &back] {
        surfaces.extend(face.windows(2).map(|w| Surface::new(w[0], w[1])));
    }
    surfaces.push(Surface::new(back[n - 1], front[0]));
    surfaces.push(Surface::new(front[n - 1], back[0]));

    log::debug!(
        "lens at x={x}: {} surfaces, edge thickness {:.4}",
        surfaces.len(),
        params.edge_thickness()
    );
    Ok(surfaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use planolux_trace::{DEFAULT_N1, DEFAULT_N2};

    #[test]
    fn test_surface_count() {
        for n in [2, 3, 16] {
            let params = LensParams {
                segments: n,
                ..Default::default()
            };
            assert_eq!(lens(&params).unwrap().len(), 2 * (n - 1) + 2);
        }
    }

    #[test]
    fn test_outline_is_closed() {
        let surfaces = lens(&LensParams::default()).unwrap();
        let count = surfaces.len();
        // Every surface ends where exactly one other begins
        for s in &surfaces {
            let next = surfaces.iter().filter(|o| o.a == s.b).count();
            assert_eq!(next, 1, "{s:?}");
        }
        assert_eq!(count, 32);
    }

    #[test]
    fn test_centre_thickness_and_aperture() {
        let params = LensParams {
            x: 3.0,
            ..Default::default()
        };
        let surfaces = lens(&params).unwrap();
        let xs: Vec<f64> = surfaces.iter().map(|s| s.a.x).collect();
        let ys: Vec<f64> = surfaces.iter().map(|s| s.a.y).collect();
        let max_x = xs.iter().cloned().fold(f64::MIN, f64::max);
        let min_x = xs.iter().cloned().fold(f64::MAX, f64::min);
        let max_y = ys.iter().cloned().fold(f64::MIN, f64::max);
        // Even segment count: the vertex nearest the axis is off-axis, so
        // the extent is slightly under the centre thickness
        assert!(max_x <= 3.5 + 1e-12 && max_x > 3.45);
        assert!(min_x >= 2.5 - 1e-12 && min_x < 2.55);
        assert_abs_diff_eq!(max_y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normals_point_outward() {
        let params = LensParams {
            x: 3.0,
            ..Default::default()
        };
        let centre = Vector2D::new(3.0, 0.0);
        for s in lens(&params).unwrap() {
            let n = s.normal().unwrap();
            let out = s.midpoint().sub(centre);
            assert!(n.dot(out) > 0.0, "{s:?}");
            assert_eq!((s.n1, s.n2), (DEFAULT_N1, DEFAULT_N2));
        }
    }

    #[test]
    fn test_edges_are_horizontal() {
        let params = LensParams {
            r1: 4.0,
            r2: 8.0,
            ..Default::default()
        };
        let surfaces = lens(&params).unwrap();
        let edges = &surfaces[surfaces.len() - 2..];
        for e in edges {
            assert_abs_diff_eq!(e.a.y, e.b.y, epsilon = 1e-12);
            assert_abs_diff_eq!(e.length(), params.edge_thickness(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_bad_params() {
        let bad = [
            LensParams {
                half_height: 6.0,
                ..Default::default()
            },
            LensParams {
                r1: -1.0,
                ..Default::default()
            },
            LensParams {
                thickness: 0.0,
                ..Default::default()
            },
            LensParams {
                segments: 1,
                ..Default::default()
            },
            LensParams {
                thickness: 0.5,
                ..Default::default()
            },
        ];
        for params in bad {
            assert!(matches!(lens(&params), Err(SceneError::InvalidLens(_))), "{params:?}");
        }
    }
}
