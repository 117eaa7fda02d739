#![warn(missing_docs)]

//! 2D ray tracing through scenes of refracting and reflecting line segments.
//!
//! Rays are traced level by level through a fixed scene. At every hit the
//! Fresnel reflectance splits the ray's energy between a reflected and a
//! refracted child; children too weak to matter are pruned.
//!
//! # Architecture
//!
//! - [`Ray`] - Finite directed segment with an intensity
//! - [`Surface`] - Oriented segment between two media
//! - [`Scene`] - Ordered, read-only surface collection
//! - [`intersect`] - Ray-segment intersection and nearest-hit lookup
//! - [`optics`] - Reflection, refraction and Fresnel reflectance
//! - [`trace`] - The breadth-first branching tracer
//!
//! # Example
//!
//! ```
//! use planolux_math::Vector2D;
//! use planolux_trace::{raytrace, Ray, Scene, Surface, TraceSettings};
//!
//! let scene: Scene = vec![Surface::new(Vector2D::new(1.0, -1.0), Vector2D::new(1.0, 1.0))].into();
//! let seeds = vec![Ray::new(Vector2D::zero(), Vector2D::new(0.5, 0.1))];
//!
//! let segments = raytrace(&seeds, &scene, &TraceSettings::default()).unwrap();
//! assert!(segments.len() >= 2);
//! ```

pub mod error;
pub mod intersect;
pub mod optics;
mod ray;
mod scene;
mod surface;
pub mod trace;

pub use error::{Result, TraceError};
pub use intersect::{cast, intersect, Hit};
pub use optics::{reflect, reflectance, refract};
pub use ray::Ray;
pub use scene::Scene;
pub use surface::{Surface, DEFAULT_N1, DEFAULT_N2};
pub use trace::{raytrace, trace, Level, RayTracer, TraceResult, TraceSettings, TraceStats};
