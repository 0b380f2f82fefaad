//! Headless PRT front-end: renders the demo scene to a PNG.

mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prt_renderer::{RtContext, Scene, SurfaceModel};

use crate::config::FileConfig;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, ValueEnum)]
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
#[command(name = "prt")]
#[command(about = "Progressive scanline ray tracer")]
struct Args {
    /// TOML render description
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Frames to accumulate
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    frames: Option<i32>,

    /// Maximum recursion depth per primary ray
    #[arg(long)]
    bounces: Option<i32>,

    /// OBJ mesh to add to the scene
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Add the demo boxes
    #[arg(long)]
    boxes: bool,

    /// Shade every surface as a mirror instead of glass
    #[arg(long)]
    mirror: bool,

    /// Visualize surface normals
    #[arg(long)]
    show_normals: bool,

    /// Logging level, RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let mut render = file.render_config();
    if let Some(width) = args.width {
        render.width = width;
    }
    if let Some(height) = args.height {
        render.height = height;
    }
    if let Some(frames) = args.frames {
        render.max_frames = frames;
    }
    if let Some(bounces) = args.bounces {
        render.max_bounces = bounces;
    }
    if args.mirror {
        render.surface = SurfaceModel::Mirror;
    }
    render.show_normals |= args.show_normals;
    anyhow::ensure!(
        render.width > 0 && render.height > 0,
        "image size must be positive"
    );

    let mut options = file.scene_options();
    if args.mesh.is_some() {
        options.mesh_path = args.mesh.clone();
    }
    options.boxes |= args.boxes;

    let scene = Scene::setup(&options).context("Failed to set up scene")?;

    log::info!(
        "Rendering {}x{}, {} frames, {} bounces",
        render.width,
        render.height,
        render.max_frames,
        render.max_bounces
    );

    let start = Instant::now();
    let mut rtx = RtContext::new(render);
    while !rtx.is_converged() {
        rtx.update_image(&scene);
    }
    log::info!("Rendered in {:.2?}", start.elapsed());

    let image = image::RgbaImage::from_raw(rtx.config.width, rtx.config.height, rtx.to_rgba8())
        .context("Framebuffer does not match image size")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
