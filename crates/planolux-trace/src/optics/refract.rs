//! Snell's-law refraction in vector form.

use planolux_math::Vector2D;

use super::SURFACE_BIAS;
use crate::error::Result;
use crate::{Ray, Surface};

/// Refract `ray` through `surface` at `hit_point`.
///
/// With `l` the unit incident direction, `n` the unit normal facing the
/// incoming ray, `r` the index ratio and `c = -n·l`:
///
/// ```text
/// v = r·l + (r·c - sqrt(1 - r²(1 - c²)))·n
/// ```
///
/// Returns `Ok(None)` under total internal reflection (negative
/// discriminant) or when the transmitted direction would not continue
/// forward. The transmitted ray has unit length and carries
/// `ray.intensity * (1 - reflectance)`.
pub fn refract(
    ray: &Ray,
    surface: &Surface,
    hit_point: Vector2D,
    reflectance: f64,
) -> Result<Option<Ray>> {
    let mut n = surface.normal()?;
    let l = ray.unit_direction()?;
    let mut r = surface.n1 / surface.n2;

    // Arriving from behind the normal: flip so n faces the incoming ray
    if l.dot(n) > 0.0 {
        n = n.scale(-1.0);
        r = 1.0 / r;
    }

    let c = -n.dot(l);
    let disc = 1.0 - r * r * (1.0 - c * c);
    if disc < 0.0 {
        return Ok(None);
    }

    let f = r * c - disc.sqrt();
    let v = l.scale(r).add(n.scale(f));
    if l.dot(v) <= 0.0 {
        return Ok(None);
    }

    let bias = n.scale(SURFACE_BIAS);
    Ok(Some(Ray {
        origin: hit_point.sub(bias),
        endpoint: hit_point.add(v),
        intensity: ray.intensity * (1.0 - reflectance),
    }))
}
