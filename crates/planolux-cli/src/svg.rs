//! SVG export of a traced scene.
//!
//! Draws, in this order:
//! - Surfaces (blue)
//! - Surface normals at each midpoint (black)
//! - Ray segments (red, opacity = intensity)
//! - Source markers where seed rays start

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use planolux_math::Vector2D;
use planolux_trace::{Ray, Surface};

/// Length of the drawn normal ticks, in scene units.
pub const NORMAL_LENGTH: f64 = 0.25;

const MARGIN: f64 = 0.5;

/// An SVG drawing of surfaces and rays.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    surfaces: Vec<Surface>,
    rays: Vec<Ray>,
    sources: Vec<Vector2D>,
}

impl SvgDocument {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add surfaces.
    pub fn add_surfaces(&mut self, surfaces: &[Surface]) {
        self.surfaces.extend_from_slice(surfaces);
    }

    /// Add ray segments.
    pub fn add_rays(&mut self, rays: &[Ray]) {
        self.rays.extend_from_slice(rays);
    }

    /// Mark the distinct origins of `seeds` as sources.
    pub fn add_sources(&mut self, seeds: &[Ray]) {
        for seed in seeds {
            if !self.sources.contains(&seed.origin) {
                self.sources.push(seed.origin);
            }
        }
    }

    /// Number of surfaces drawn.
    pub fn num_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of ray segments drawn.
    pub fn num_rays(&self) -> usize {
        self.rays.len()
    }

    /// Scene-space bounds `(min, max)` of everything drawn, with a margin.
    fn bounds(&self) -> (Vector2D, Vector2D) {
        let points = self
            .surfaces
            .iter()
            .flat_map(|s| [s.a, s.b])
            .chain(self.rays.iter().flat_map(|r| [r.origin, r.endpoint]))
            .chain(self.sources.iter().copied())
            .filter(|p| p.is_finite());

        let mut min = Vector2D::new(f64::INFINITY, f64::INFINITY);
        let mut max = Vector2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min = Vector2D::new(min.x.min(p.x), min.y.min(p.y));
            max = Vector2D::new(max.x.max(p.x), max.y.max(p.y));
        }
        if min.x > max.x {
            return (Vector2D::new(-1.0, -1.0), Vector2D::new(1.0, 1.0));
        }
        let pad = Vector2D::new(MARGIN, MARGIN);
        (min - pad, max + pad)
    }

    /// Write the drawing to `writer`.
    ///
    /// Scene Y points up, so every Y coordinate is negated.
    pub fn write(&self, writer: &mut impl Write) -> std::io::Result<()> {
        let (min, max) = self.bounds();
        let width = max.x - min.x;
        let height = max.y - min.y;
        let stroke = width.max(height) * 0.002;

        writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.6} {:.6} {:.6} {:.6}">"#,
            min.x, -max.y, width, height
        )?;
        writeln!(
            writer,
            r#"<rect x="{:.6}" y="{:.6}" width="{:.6}" height="{:.6}" fill="white"/>"#,
            min.x, -max.y, width, height
        )?;

        writeln!(writer, r#"<g stroke="blue" stroke-width="{:.6}">"#, stroke * 2.0)?;
        for s in &self.surfaces {
            write_line(writer, "surface", s.a, s.b, None)?;
        }
        writeln!(writer, "</g>")?;

        writeln!(writer, r#"<g stroke="black" stroke-width="{:.6}">"#, stroke)?;
        for s in &self.surfaces {
            if let Ok(normal) = s.normal_ray_at(s.midpoint(), NORMAL_LENGTH) {
                write_line(writer, "normal", normal.origin, normal.endpoint, None)?;
            }
        }
        writeln!(writer, "</g>")?;

        writeln!(writer, r#"<g stroke="red" stroke-width="{:.6}">"#, stroke)?;
        for r in &self.rays {
            write_line(writer, "ray", r.origin, r.endpoint, Some(r.intensity.clamp(0.0, 1.0)))?;
        }
        writeln!(writer, "</g>")?;

        for p in &self.sources {
            writeln!(
                writer,
                r#"<circle class="source" cx="{:.6}" cy="{:.6}" r="{:.6}" fill="orange"/>"#,
                p.x,
                -p.y,
                stroke * 4.0
            )?;
        }

        writeln!(writer, "</svg>")?;
        Ok(())
    }

    /// Export the drawing to an SVG file.
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()
    }
}

fn write_line(
    writer: &mut impl Write,
    class: &str,
    a: Vector2D,
    b: Vector2D,
    opacity: Option<f64>,
) -> std::io::Result<()> {
    write!(
        writer,
        r#"<line class="{class}" x1="{:.6}" y1="{:.6}" x2="{:.6}" y2="{:.6}""#,
        a.x, -a.y, b.x, -b.y
    )?;
    if let Some(opacity) = opacity {
        write!(writer, r#" stroke-opacity="{opacity:.4}""#)?;
    }
    writeln!(writer, "/>")
}
