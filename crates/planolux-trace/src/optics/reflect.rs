//! Mirror reflection about a surface normal.

use planolux_math::Vector2D;

use super::SURFACE_BIAS;
use crate::error::Result;
use crate::{Ray, Surface};

/// Reflect `ray` off `surface` at `hit_point`.
///
/// The outgoing ray has unit length and carries `ray.intensity * reflectance`.
/// Its origin is biased onto the side of the surface it leaves towards.
pub fn reflect(ray: &Ray, surface: &Surface, hit_point: Vector2D, reflectance: f64) -> Result<Ray> {
    let n = surface.normal()?;
    let d = ray.unit_direction()?;

    let r = d.sub(n.scale(2.0 * d.dot(n)));
    let bias = n.scale(sign(r.dot(n)) * SURFACE_BIAS);

    Ok(Ray {
        origin: hit_point.add(bias),
        endpoint: hit_point.add(r),
        intensity: ray.intensity * reflectance,
    })
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
