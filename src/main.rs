use std::path::PathBuf;

use anyhow::{ Context, Result };
use clap::{ Parser, ValueEnum };
use log::{ info, LevelFilter };

use ray_caster::consts::OUT_FILE;
use ray_caster::scene::Scene;

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

/// Casts rays at spheres and writes the result as a PPM image.
#[derive(Parser)]
#[clap(name = "ray-caster", version, about)]
struct Args {
    /// JSON scene description; renders the built-in scene if omitted
    scene: Option<PathBuf>,

    /// Where to write the PPM image
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Override the canvas width, in pixels
    #[clap(long)]
    width: Option<usize>,

    /// Override the canvas height, in pixels
    #[clap(long)]
    height: Option<usize>,

    /// Logging verbosity; RUST_LOG filters still apply on top
    #[clap(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .parse_env("RUST_LOG")
        .init();

    let mut scene = match &args.scene {
        Some(path) => Scene::from_file(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            info!("no scene given, rendering the built-in scene");
            Scene::default()
        },
    };

    if let Some(width) = args.width {
        scene.canvas_width = width;
    }
    if let Some(height) = args.height {
        scene.canvas_height = height;
    }

    let canvas = scene.render().context("render failed")?;
    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("wrote {}", args.output.display());
    Ok(())
}
