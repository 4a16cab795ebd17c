//! Glint - render a sphere scene to a PPM or PNG file.

mod cli;
mod progress_bar;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{
    Camera, CameraSettings, HittableList, LogProgress, NoProgress, PixelBuffer, PixelSink,
    PpmWriter, Progress,
};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal};
use std::path::Path;
use std::time::Instant;

use crate::cli::{Args, SceneChoice};
use crate::progress_bar::ScanlineBar;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("Failed to configure render threads")?;
    }

    let start = Instant::now();
    let (world, scene_camera) = build_scene(args.scene, args.seed);
    log::info!(
        "Scene {:?} built with {} objects in {:.2?}",
        args.scene,
        world.len(),
        start.elapsed()
    );

    let settings = resolve_settings(&args, scene_camera)?;
    let camera = Camera::new(settings);

    let progress: Box<dyn Progress> = if args.quiet {
        Box::new(NoProgress)
    } else if io::stderr().is_terminal() {
        Box::new(ScanlineBar::new(camera.image_height()))
    } else {
        Box::new(LogProgress)
    };

    if args.output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut sink = PpmWriter::new(BufWriter::new(stdout.lock()));
        render(&args, &camera, &world, &mut sink, progress.as_ref())?;
    } else if is_ppm(&args.output) {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
        let mut sink = PpmWriter::new(BufWriter::new(file));
        render(&args, &camera, &world, &mut sink, progress.as_ref())?;
        log::info!("Saved to {}", args.output.display());
    } else {
        let mut buffer = PixelBuffer::new();
        render(&args, &camera, &world, &mut buffer, progress.as_ref())?;
        buffer
            .save(&args.output)
            .with_context(|| format!("Failed to save {}", args.output.display()))?;
    }

    Ok(())
}

/// Initialize the logger; RUST_LOG overrides the command line level.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_scene(choice: SceneChoice, seed: u64) -> (HittableList, CameraSettings) {
    match choice {
        SceneChoice::Final => scenes::final_scene(&mut StdRng::seed_from_u64(seed)),
        SceneChoice::Showcase => scenes::showcase_scene(),
    }
}

/// Camera settings from the settings file (or the scene), then CLI overrides.
fn resolve_settings(args: &Args, scene_camera: CameraSettings) -> Result<CameraSettings> {
    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => scene_camera,
    };

    if let Some(width) = args.width {
        settings.image_width = width;
    }
    if let Some(samples) = args.samples_per_pixel {
        settings.samples_per_pixel = samples;
    }
    if let Some(depth) = args.max_depth {
        settings.max_depth = depth;
    }

    if settings.image_width == 0 || settings.aspect_ratio <= 0.0 {
        anyhow::bail!(
            "Invalid image size: width {} with aspect ratio {}",
            settings.image_width,
            settings.aspect_ratio
        );
    }

    Ok(settings)
}

fn load_settings(path: &Path) -> Result<CameraSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Invalid camera settings in {}", path.display()))?;
    log::debug!("Loaded camera settings from {}", path.display());
    Ok(settings)
}

fn is_ppm(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("ppm"))
        .unwrap_or(false)
}

fn render(
    args: &Args,
    camera: &Camera,
    world: &HittableList,
    sink: &mut dyn PixelSink,
    progress: &dyn Progress,
) -> Result<()> {
    if args.single_threaded {
        let mut rng = StdRng::seed_from_u64(args.seed);
        camera.render(world, sink, progress, &mut rng)?;
        return Ok(());
    }

    camera.render_parallel(world, sink, progress, args.seed)?;
    Ok(())
}
