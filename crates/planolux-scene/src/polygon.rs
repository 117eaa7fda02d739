//! Closed polygonal outlines such as prisms and blocks.

use planolux_math::{Tolerance, Vector2D};
use planolux_trace::{Surface, DEFAULT_N1, DEFAULT_N2};
use serde::{Deserialize, Serialize};

use crate::{Result, SceneError};

/// A closed outline filled with one medium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonParams {
    /// Vertices in either winding order.
    pub points: Vec<Vector2D>,
    /// Index of the medium inside the outline.
    #[serde(default = "default_inside")]
    pub n_inside: f64,
    /// Index of the medium outside the outline.
    #[serde(default = "default_outside")]
    pub n_outside: f64,
}

fn default_inside() -> f64 {
    DEFAULT_N2
}

fn default_outside() -> f64 {
    DEFAULT_N1
}

impl PolygonParams {
    /// Build the outline.
    pub fn build(&self) -> Result<Vec<Surface>> {
        polygon(&self.points, self.n_inside, self.n_outside)
    }
}

/// Signed area of a closed outline.
/// Positive for counter-clockwise, negative for clockwise.
pub fn signed_area(points: &[Vector2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].cross(points[j]);
    }
    area / 2.0
}

/// One surface per edge of the closed outline through `points`.
///
/// The outline is re-wound counter-clockwise first, so every normal points
/// out of the polygon and `n1` is the outside medium.
pub fn polygon(points: &[Vector2D], n_inside: f64, n_outside: f64) -> Result<Vec<Surface>> {
    if points.len() < 3 {
        return Err(SceneError::InvalidPolygon(format!(
            "need at least 3 points, got {}",
            points.len()
        )));
    }
    let tol = Tolerance::DEFAULT;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        if tol.points_equal(*p, q) {
            return Err(SceneError::InvalidPolygon(format!(
                "points {i} and {} coincide",
                (i + 1) % points.len()
            )));
        }
    }

    let area = signed_area(points);
    if !area.is_finite() || tol.is_zero(area) {
        return Err(SceneError::InvalidPolygon("outline has zero area".into()));
    }

    let mut outline = points.to_vec();
    if area < 0.0 {
        outline.reverse();
    }

    let n = outline.len();
    Ok((0..n)
        .map(|i| Surface::with_indices(outline[i], outline[(i + 1) % n], n_outside, n_inside))
        .collect())
}
