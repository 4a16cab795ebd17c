use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
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

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Ground plane, a field of small random spheres and three large ones
    Final,
    /// Four spheres: diffuse, hollow glass, fuzzy metal, ground
    Showcase,
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a sphere scene with a CPU path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "final")]
    pub scene: SceneChoice,

    /// JSON file with camera settings; replaces the scene's own framing
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Output file: .ppm is written as plain-text PPM, "-" streams PPM to
    /// stdout, anything else is encoded by extension (e.g. .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Worker threads for the parallel renderer (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Render on the calling thread with a single random stream
    #[arg(long)]
    pub single_threaded: bool,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Logging level; RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
