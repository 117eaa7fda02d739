//! Scenes: ordered, read-only collections of surfaces.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};
use crate::intersect::{cast, Hit};
use crate::{Ray, Surface};

/// An ordered collection of surfaces.
///
/// Order only matters for breaking exact distance ties in [`Scene::cast`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    surfaces: Vec<Surface>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a surface.
    pub fn add(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    /// Append several surfaces in order.
    pub fn extend<I: IntoIterator<Item = Surface>>(&mut self, surfaces: I) {
        self.surfaces.extend(surfaces);
    }

    /// The surfaces in scene order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// True if the scene has no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Nearest surface hit by `ray`, if any.
    pub fn cast(&self, ray: &Ray) -> Option<Hit<'_>> {
        cast(ray, &self.surfaces)
    }

    /// Check every surface is usable for tracing.
    ///
    /// Surfaces must have finite vertices, a non-zero finite length and
    /// finite, positive refractive indices.
    pub fn validate(&self) -> Result<()> {
        for (index, s) in self.surfaces.iter().enumerate() {
            let invalid = |reason: &str| TraceError::InvalidScene {
                index,
                reason: reason.into(),
            };
            if !s.a.is_finite() || !s.b.is_finite() {
                return Err(invalid("vertices must be finite"));
            }
            if s.normal().is_err() {
                return Err(invalid("surface length is zero or not finite"));
            }
            if !(s.n1.is_finite() && s.n1 > 0.0 && s.n2.is_finite() && s.n2 > 0.0) {
                return Err(invalid("refractive indices must be finite and positive"));
            }
        }
        Ok(())
    }
}

impl From<Vec<Surface>> for Scene {
    fn from(surfaces: Vec<Surface>) -> Self {
        Self { surfaces }
    }
}

impl FromIterator<Surface> for Scene {
    fn from_iter<I: IntoIterator<Item = Surface>>(iter: I) -> Self {
        Self {
            surfaces: iter.into_iter().collect(),
        }
    }
}
