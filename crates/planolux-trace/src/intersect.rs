//! Ray-segment intersection and nearest-surface lookup.

use planolux_math::Vector2D;

use crate::{Ray, Surface};

/// Nearest intersection of a ray with a scene.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Intersection point.
    pub point: Vector2D,
    /// Surface that was hit.
    pub surface: &'a Surface,
    /// Index of the surface in the scene.
    pub index: usize,
    /// Distance from the ray origin to `point`.
    pub distance: f64,
}

/// Intersect a ray with a surface segment.
///
/// Solves `origin + t * ray_dir = a + u * surf_dir` with 2D cross products.
/// Returns the hit point when `t > 0` and `0 < u < 1`. Both bounds are
/// strict: a ray never hits at its own origin, and a segment never
/// registers a hit at its vertices, so a ray crossing the shared vertex of
/// two adjacent surfaces is not counted twice.
pub fn intersect(ray: &Ray, surface: &Surface) -> Option<Vector2D> {
    let rd = ray.direction();
    let sd = surface.direction();

    let denom = sd.cross(rd);
    // Parallel or collinear
    if denom == 0.0 {
        return None;
    }

    let ac = ray.origin.sub(surface.a);
    let t = ac.cross(sd) / denom;
    let u = ac.cross(rd) / denom;

    if t > 0.0 && u > 0.0 && u < 1.0 {
        Some(ray.at(t))
    } else {
        None
    }
}

/// Find the surface nearest to the ray origin along the ray.
///
/// Surfaces are tested in order; on an exact distance tie the earlier
/// surface wins.
pub fn cast<'a>(ray: &Ray, surfaces: &'a [Surface]) -> Option<Hit<'a>> {
    let mut nearest: Option<Hit<'a>> = None;

    for (index, surface) in surfaces.iter().enumerate() {
        let Some(point) = intersect(ray, surface) else {
            continue;
        };
        let distance = ray.origin.distance(point);
        if nearest.map_or(true, |h| distance < h.distance) {
            nearest = Some(Hit {
                point,
                surface,
                index,
                distance,
            });
        }
    }

    nearest
}
