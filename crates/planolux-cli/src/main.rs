//! planolux CLI - 2D optical ray tracer
//!
//! Traces a scene file and exports the result as SVG and/or JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use planolux_scene::{SceneFile, Setup};
use planolux_trace::{RayTracer, TraceResult, TraceSettings};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod svg;

use svg::SvgDocument;

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "planolux")]
#[command(about = "2D optical ray tracer", long_about = None)]
struct Cli {
    /// Set the logging level
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace a scene file
    Trace {
        /// Scene file (.toml)
        scene: PathBuf,
        /// Write every traced segment and the trace counters as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write a drawing of the scene and the rays as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Display information about a scene file
    Info {
        /// Scene file (.toml)
        scene: PathBuf,
    },
}

/// Command-line overrides for the scene file's `[settings]`.
#[derive(Debug, Default, clap::Args)]
struct Overrides {
    /// Maximum interaction depth
    #[arg(long)]
    depth: Option<u32>,
    /// Intensity at or below which child rays are dropped
    #[arg(long)]
    threshold: Option<f64>,
    /// Do not spawn reflected rays
    #[arg(long)]
    no_reflect: bool,
    /// Do not spawn refracted rays
    #[arg(long)]
    no_refract: bool,
}

impl Overrides {
    fn apply(&self, settings: &mut TraceSettings) {
        if let Some(depth) = self.depth {
            settings.depth = depth;
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
        if self.no_reflect {
            settings.reflect = false;
        }
        if self.no_refract {
            settings.refract = false;
        }
    }
}

/// JSON dump of a trace.
#[derive(Serialize)]
struct TraceDump<'a> {
    settings: &'a TraceSettings,
    #[serde(flatten)]
    result: &'a TraceResult,
}

/// Initialize the logger; `RUST_LOG` still refines per module.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level.into());

    match cli.command {
        Commands::Trace {
            scene,
            json,
            svg,
            overrides,
        } => {
            run_trace(&scene, json.as_deref(), svg.as_deref(), &overrides)?;
        }
        Commands::Info { scene } => {
            show_info(&scene)?;
        }
    }

    Ok(())
}

fn load(path: &Path, overrides: &Overrides) -> Result<Setup> {
    let mut file = SceneFile::load(path)?;
    overrides.apply(&mut file.settings);
    file.build()
        .with_context(|| format!("building scene {}", path.display()))
}

fn run_trace(
    path: &Path,
    json: Option<&Path>,
    svg: Option<&Path>,
    overrides: &Overrides,
) -> Result<()> {
    let setup = load(path, overrides)?;
    let tracer = RayTracer::new(&setup.scene, setup.settings)?;
    let result = tracer.run(&setup.seeds)?;
    let stats = &result.stats;

    println!("Traced {}", path.display());
    println!("  Segments: {}", result.segments.len());
    println!("  Levels: {}", stats.levels);
    println!("  Hits: {}", stats.hits);
    println!("  Misses: {}", stats.misses);
    println!("  Total internal reflections: {}", stats.total_internal_reflections);
    println!("  Pruned: {}", stats.pruned);
    if stats.unresolved > 0 {
        println!("  Unresolved at depth limit: {}", stats.unresolved);
    }

    if let Some(out) = json {
        write_json(out, &setup.settings, &result)?;
        println!("Exported JSON to {}", out.display());
    }

    if let Some(out) = svg {
        let mut doc = SvgDocument::new();
        doc.add_surfaces(setup.scene.surfaces());
        doc.add_rays(&result.segments);
        doc.add_sources(&setup.seeds);
        info!(
            "drawing {} surfaces and {} rays",
            doc.num_surfaces(),
            doc.num_rays()
        );
        doc.export(out)
            .with_context(|| format!("writing {}", out.display()))?;
        println!("Exported SVG to {}", out.display());
    }

    Ok(())
}

fn dump_json(settings: &TraceSettings, result: &TraceResult) -> Result<String> {
    let dump = TraceDump { settings, result };
    Ok(serde_json::to_string_pretty(&dump)?)
}

fn write_json(path: &Path, settings: &TraceSettings, result: &TraceResult) -> Result<()> {
    let json = dump_json(settings, result)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn show_info(path: &Path) -> Result<()> {
    let file = SceneFile::load(path)?;
    let setup = file
        .build()
        .with_context(|| format!("building scene {}", path.display()))?;
    let s = &setup.settings;

    println!("planolux scene: {}", path.display());
    println!("  Surfaces: {}", setup.scene.len());
    println!("    raw: {}", file.surfaces.len());
    println!("    lenses: {}", file.lenses.len());
    println!("    polygons: {}", file.polygons.len());
    println!("  Seed rays: {}", setup.seeds.len());
    println!("\nSettings:");
    println!("  Depth: {}", s.depth);
    println!("  Threshold: {}", s.threshold);
    println!("  Reflect: {}", s.reflect);
    println!("  Refract: {}", s.refract);

    Ok(())
}
