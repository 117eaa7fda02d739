//! Unpolarized Fresnel reflectance.

use crate::error::Result;
use crate::{Ray, Surface};

/// Fraction of energy reflected when `ray` meets `surface`.
///
/// The incident and transmitted media are chosen by which side of the
/// normal the ray arrives from. Beyond the critical angle the result is
/// exactly `1.0`.
pub fn reflectance(ray: &Ray, surface: &Surface) -> Result<f64> {
    let d = ray.unit_direction()?;
    let n = surface.normal()?;
    let dn = d.dot(n).clamp(-1.0, 1.0);

    let (n1, n2, angle) = if dn < 0.0 {
        (surface.n1, surface.n2, (-dn).acos())
    } else {
        (surface.n2, surface.n1, dn.acos())
    };

    Ok(reflectance_at(n1, n2, angle))
}

/// Fresnel reflectance going from index `n1` into `n2` at `angle` radians
/// from the normal, averaged over s and p polarization.
pub fn reflectance_at(n1: f64, n2: f64, angle: f64) -> f64 {
    let k = n1 / n2 * angle.sin();
    if k * k > 1.0 {
        return 1.0;
    }

    let cos_i = angle.cos();
    let cos_t = (1.0 - k * k).sqrt();

    let rs = ((n1 * cos_i - n2 * cos_t) / (n1 * cos_i + n2 * cos_t)).powi(2);
    let rp = ((-n2 * cos_i + n1 * cos_t) / (n2 * cos_i + n1 * cos_t)).powi(2);
    0.5 * (rs + rp)
}
