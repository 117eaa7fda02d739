//! Surface interactions: mirror reflection, Snell refraction and Fresnel
//! energy splitting.
//!
//! Reflection and refraction only build the outgoing ray geometry; the
//! energy fraction `R` is always computed by [`reflectance`] and passed in
//! by the caller.

mod fresnel;
mod reflect;
mod refract;

pub use fresnel::{reflectance, reflectance_at};
pub use reflect::reflect;
pub use refract::refract;

/// Distance outgoing rays are nudged off the hit point so they do not
/// immediately re-intersect the surface they left.
pub const SURFACE_BIAS: f64 = 1e-12;
