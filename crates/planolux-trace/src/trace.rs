//! Breadth-first branching ray tracer.
//!
//! Every level casts the current frontier against the scene. A ray that hits
//! nothing is recorded as-is and dies. A ray that hits a surface is cut at
//! the hit point, recorded, and spawns up to two children: the refracted
//! ray weighted by `1 - R` and the reflected ray weighted by `R`, where `R`
//! is the Fresnel reflectance. Children at or below the intensity threshold
//! are dropped. Energy never grows along a branch, so the threshold bounds
//! the total number of segments.
//!
//! Rays that miss keep their seed extent (typically unit length) rather than
//! being extended to infinity. This is a drawing convention for whatever
//! renders the trace, not a claim about how far light travels.

use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};
use crate::optics::{reflect, reflectance, refract};
use crate::{Ray, Scene};

/// Trace parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Maximum number of interaction levels (at least 1).
    pub depth: u32,
    /// Children must carry strictly more than this intensity, in `[0, 1)`.
    pub threshold: f64,
    /// Spawn reflected rays.
    pub reflect: bool,
    /// Spawn refracted rays.
    pub refract: bool,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            depth: 10,
            threshold: 0.001,
            reflect: true,
            refract: true,
        }
    }
}

impl TraceSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.depth < 1 {
            return Err(TraceError::InvalidSettings("depth must be at least 1".into()));
        }
        if !(self.threshold >= 0.0 && self.threshold < 1.0) {
            return Err(TraceError::InvalidSettings(
                "threshold must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

/// Counters gathered during a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStats {
    /// Levels actually executed (stops early once the frontier empties).
    pub levels: u32,
    /// Rays that hit a surface.
    pub hits: usize,
    /// Rays that hit nothing.
    pub misses: usize,
    /// Hits where no transmitted ray exists and all energy reflects.
    pub total_internal_reflections: usize,
    /// Children dropped at or below the threshold.
    pub pruned: usize,
    /// Rays still alive after the last level.
    pub unresolved: usize,
}

impl TraceStats {
    fn merge(&mut self, other: &TraceStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.total_internal_reflections += other.total_internal_reflections;
        self.pruned += other.pruned;
    }
}

/// Output of a full trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Every segment traversed, in level order.
    pub segments: Vec<Ray>,
    /// Counters.
    pub stats: TraceStats,
}

/// Output of a single level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    /// Segments recorded at this level, one per input ray.
    pub segments: Vec<Ray>,
    /// Surviving children, the next level's input.
    pub frontier: Vec<Ray>,
    /// Counters for this level.
    pub stats: TraceStats,
}

/// Result of interacting one ray with the scene.
struct Step {
    segment: Ray,
    children: Vec<Ray>,
    stats: TraceStats,
}

/// Depth-bounded, intensity-pruned branching tracer over a fixed scene.
#[derive(Debug, Clone, Copy)]
pub struct RayTracer<'a> {
    scene: &'a Scene,
    settings: TraceSettings,
}

impl<'a> RayTracer<'a> {
    /// Create a tracer, validating the settings and the scene.
    pub fn new(scene: &'a Scene, settings: TraceSettings) -> Result<Self> {
        settings.validate()?;
        scene.validate()?;
        Ok(Self { scene, settings })
    }

    /// Settings in use.
    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    /// Trace `seeds` through the scene.
    pub fn run(&self, seeds: &[Ray]) -> Result<TraceResult> {
        validate_seeds(seeds)?;

        let mut frontier = seeds.to_vec();
        let mut segments = Vec::new();
        let mut stats = TraceStats::default();

        for depth in 1..=self.settings.depth {
            if frontier.is_empty() {
                break;
            }
            let level = self.step_level(&frontier)?;
            debug!(
                "level {}: {} in, {} hits, {} misses, {} pruned, {} out",
                depth,
                frontier.len(),
                level.stats.hits,
                level.stats.misses,
                level.stats.pruned,
                level.frontier.len()
            );
            segments.extend(level.segments);
            stats.merge(&level.stats);
            stats.levels = depth;
            frontier = level.frontier;
        }

        if !frontier.is_empty() {
            warn!(
                "{} rays still alive after {} levels",
                frontier.len(),
                self.settings.depth
            );
        }
        stats.unresolved = frontier.len();
        segments.extend(frontier);

        Ok(TraceResult { segments, stats })
    }

    /// Advance a frontier by one level.
    ///
    /// Rays are processed in parallel but results keep frontier order, so
    /// the output is identical to a sequential pass.
    pub fn step_level(&self, frontier: &[Ray]) -> Result<Level> {
        let steps: Vec<Step> = frontier
            .par_iter()
            .map(|ray| self.step(ray))
            .collect::<Result<_>>()?;

        let mut level = Level {
            segments: Vec::with_capacity(steps.len()),
            frontier: Vec::with_capacity(steps.len() * 2),
            stats: TraceStats::default(),
        };
        for step in steps {
            level.segments.push(step.segment);
            level.frontier.extend(step.children);
            level.stats.merge(&step.stats);
        }
        Ok(level)
    }

    fn step(&self, ray: &Ray) -> Result<Step> {
        let mut stats = TraceStats::default();

        let Some(hit) = self.scene.cast(ray) else {
            stats.misses = 1;
            return Ok(Step {
                segment: *ray,
                children: Vec::new(),
                stats,
            });
        };
        stats.hits = 1;

        let advanced = ray.truncated_at(hit.point);
        let surface = hit.surface;
        let mut r = reflectance(&advanced, surface)?;
        let mut children = Vec::with_capacity(2);

        if self.settings.refract {
            match refract(&advanced, surface, hit.point, r)? {
                Some(child) => self.keep(child, &mut children, &mut stats),
                None => {
                    r = 1.0;
                    stats.total_internal_reflections = 1;
                }
            }
        }

        if self.settings.reflect {
            let child = reflect(&advanced, surface, hit.point, r)?;
            self.keep(child, &mut children, &mut stats);
        }

        trace!(
            "{} hit surface {} at {} (R = {:.4}, {} children)",
            advanced,
            hit.index,
            hit.point,
            r,
            children.len()
        );

        Ok(Step {
            segment: advanced,
            children,
            stats,
        })
    }

    fn keep(&self, child: Ray, children: &mut Vec<Ray>, stats: &mut TraceStats) {
        if child.intensity > self.settings.threshold {
            children.push(child);
        } else {
            stats.pruned += 1;
        }
    }
}

/// Trace `seeds` through `scene` and return every segment traversed.
pub fn raytrace(seeds: &[Ray], scene: &Scene, settings: &TraceSettings) -> Result<Vec<Ray>> {
    Ok(trace(seeds, scene, settings)?.segments)
}

/// Trace `seeds` through `scene`, returning segments and counters.
pub fn trace(seeds: &[Ray], scene: &Scene, settings: &TraceSettings) -> Result<TraceResult> {
    RayTracer::new(scene, *settings)?.run(seeds)
}

fn validate_seeds(seeds: &[Ray]) -> Result<()> {
    for (index, ray) in seeds.iter().enumerate() {
        let invalid = |reason: &str| TraceError::InvalidRay {
            index,
            reason: reason.into(),
        };
        if !ray.is_finite() {
            return Err(invalid("coordinates and intensity must be finite"));
        }
        if ray.unit_direction().is_err() {
            return Err(invalid("ray has zero length"));
        }
        if !(ray.intensity > 0.0 && ray.intensity <= 1.0) {
            return Err(invalid("intensity must be in (0, 1]"));
        }
    }
    Ok(())
}
