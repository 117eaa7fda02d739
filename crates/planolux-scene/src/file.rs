//! TOML scene files.

use std::path::Path;

use log::{debug, info};
use planolux_trace::{Ray, Scene, Surface, TraceSettings};
use serde::{Deserialize, Serialize};

use crate::fan::FanParams;
use crate::lens::{lens, LensParams};
use crate::polygon::PolygonParams;
use crate::{Result, SceneError};

/// Contents of a scene file, before the builders run.
///
/// Every table is optional; a missing `[settings]` gives the default
/// trace settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    /// Trace settings.
    pub settings: TraceSettings,
    /// Raw surfaces, added first.
    pub surfaces: Vec<Surface>,
    /// Lenses, added after the raw surfaces.
    pub lenses: Vec<LensParams>,
    /// Polygons, added last.
    pub polygons: Vec<PolygonParams>,
    /// Seed fans.
    pub fans: Vec<FanParams>,
    /// Explicit seed rays, after the fans.
    pub rays: Vec<Ray>,
}

/// A scene ready to trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Setup {
    /// Surfaces to trace against.
    pub scene: Scene,
    /// Seed rays.
    pub seeds: Vec<Ray>,
    /// Trace settings.
    pub settings: TraceSettings,
}

impl SceneFile {
    /// Parse a scene file from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded scene file {}", path.display());
        Self::from_toml(&text)
    }

    /// Run the builders and validate the result.
    pub fn build(&self) -> Result<Setup> {
        let mut scene = Scene::new();
        scene.extend(self.surfaces.iter().copied());
        for params in &self.lenses {
            scene.extend(lens(params)?);
        }
        for params in &self.polygons {
            scene.extend(params.build()?);
        }

        let mut seeds = Vec::new();
        for params in &self.fans {
            seeds.extend(params.build()?);
        }
        seeds.extend(self.rays.iter().copied());

        self.settings.validate()?;
        scene.validate()?;

        debug!(
            "built scene: {} surfaces, {} seeds ({} lenses, {} polygons, {} fans)",
            scene.len(),
            seeds.len(),
            self.lenses.len(),
            self.polygons.len(),
            self.fans.len()
        );

        Ok(Setup {
            scene,
            seeds,
            settings: self.settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planolux_math::Vector2D;
    use planolux_trace::{TraceError, DEFAULT_N2};

    const FULL: &str = r#"
[settings]
depth = 4
threshold = 0.01
reflect = false

[[surfaces]]
a = { x = -1.0, y = 0.0 }
b = { x = 1.0, y = 0.0 }
n2 = 1.33

[[lenses]]
r1 = 5.0
r2 = 5.0
thickness = 1.0
half_height = 2.0
x = 3.0
segments = 8

[[polygons]]
points = [{ x = 5.0, y = -1.0 }, { x = 7.0, y = -1.0 }, { x = 6.0, y = 1.0 }]

[[fans]]
source = { x = 0.0, y = 0.0 }
start = -30.0
end = 30.0
count = 20

[[rays]]
origin = { x = 0.0, y = 1.0 }
endpoint = { x = 0.0, y = 0.0 }
intensity = 0.5
"#;

    #[test]
    fn test_parse_full_file() {
        let file = SceneFile::from_toml(FULL).unwrap();
        assert_eq!(file.settings.depth, 4);
        assert!(!file.settings.reflect);
        assert!(file.settings.refract);
        assert_eq!(file.surfaces[0].n1, 1.0);
        assert_eq!(file.surfaces[0].n2, 1.33);
        assert!(file.fans[0].endpoint);
        assert_eq!(file.rays[0].intensity, 0.5);
    }

    #[test]
    fn test_build_order_and_counts() {
        let setup = SceneFile::from_toml(FULL).unwrap().build().unwrap();
        // 1 raw + 2*(8-1)+2 lens + 3 polygon
        assert_eq!(setup.scene.len(), 1 + 16 + 3);
        assert_eq!(setup.scene.surfaces()[0].n2, 1.33);
        assert_eq!(setup.scene.surfaces()[1].n2, DEFAULT_N2);
        assert_eq!(setup.seeds.len(), 21);
        assert_eq!(setup.seeds[20].origin, Vector2D::new(0.0, 1.0));
        assert_eq!(setup.settings.threshold, 0.01);
    }

    #[test]
    fn test_empty_file_defaults() {
        let setup = SceneFile::from_toml("").unwrap().build().unwrap();
        assert!(setup.scene.is_empty());
        assert!(setup.seeds.is_empty());
        assert_eq!(setup.settings, TraceSettings::default());
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            SceneFile::from_toml("[[surfaces]\na = 1"),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let file = SceneFile::from_toml("[settings]\ndepth = 0").unwrap();
        assert!(matches!(
            file.build(),
            Err(SceneError::Trace(TraceError::InvalidSettings(_)))
        ));
    }

    #[test]
    fn test_degenerate_surface_rejected() {
        let file = SceneFile::from_toml(
            "[[surfaces]]\na = { x = 1.0, y = 1.0 }\nb = { x = 1.0, y = 1.0 }",
        )
        .unwrap();
        assert!(matches!(
            file.build(),
            Err(SceneError::Trace(TraceError::InvalidScene { index: 0, .. }))
        ));
    }

    #[test]
    fn test_bad_lens_rejected() {
        let file = SceneFile::from_toml(
            "[[lenses]]\nr1 = 1.0\nr2 = 1.0\nthickness = 1.0\nhalf_height = 2.0",
        )
        .unwrap();
        assert!(matches!(file.build(), Err(SceneError::InvalidLens(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = SceneFile::load("/nonexistent/planolux/scene.toml").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
