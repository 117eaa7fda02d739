#![warn(missing_docs)]

//! Scene construction for planolux.
//!
//! Builds the surfaces and seed rays a trace runs on, either directly or
//! from a TOML scene file.
//!
//! # Architecture
//!
//! - [`fan`] - Seed ray fans from a point source
//! - [`mod@lens`] - Polygonal biconvex lenses
//! - [`mod@polygon`] - Closed outlines (prisms, blocks)
//! - [`file`] - TOML scene files
//!
//! # Example
//!
//! ```
//! use planolux_scene::SceneFile;
//!
//! let setup = SceneFile::from_toml(r#"
//! [[lenses]]
//! r1 = 5.0
//! r2 = 5.0
//! thickness = 1.0
//! half_height = 2.0
//!
//! [[fans]]
//! source = { x = -4.0, y = 0.0 }
//! start = -10.0
//! end = 10.0
//! count = 5
//! "#).unwrap().build().unwrap();
//!
//! assert_eq!(setup.scene.len(), 32);
//! assert_eq!(setup.seeds.len(), 5);
//! ```

pub mod error;
pub mod fan;
pub mod file;
pub mod lens;
pub mod polygon;

pub use error::{Result, SceneError};
pub use fan::{ray_fan, FanParams};
pub use file::{SceneFile, Setup};
pub use lens::{lens, LensParams};
pub use polygon::{polygon, signed_area, PolygonParams};
