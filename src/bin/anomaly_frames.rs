//! anomaly-frames: renders the temperature anomaly animation.
//!
//! Reads the monthly anomaly CSV, then writes one numbered PNG per frame to
//! the output directory. Assembling the frames into a video is left to an
//! external tool, e.g.
//! `ffmpeg -i output/frames/%07d.png -c:v libx264 out.mp4`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use anomaly_viz::animation::Animation;
use anomaly_viz::dataset::Dataset;
use anomaly_viz::output::PngEncoder;
use anomaly_viz::series::Easing;

/// Renders global temperature anomaly frames for video assembly.
#[derive(Parser, Debug)]
#[command(name = "anomaly-frames")]
#[command(version)]
#[command(about = "Renders temperature anomaly animation frames", long_about = None)]
struct Cli {
    /// Path to the monthly anomaly CSV dataset
    #[arg(long, default_value = "dataset/1880-2020.csv")]
    dataset: PathBuf,

    /// Output directory for frame images
    #[arg(short, long, default_value = "output/frames")]
    output: PathBuf,

    /// Animation duration in frames
    #[arg(short, long, default_value_t = 1080)]
    duration: u32,

    /// Size of the drawing area in pixels
    #[arg(short, long, default_value_t = 1000)]
    size: u32,

    /// Height of the title band in pixels
    #[arg(short, long, default_value_t = 80)]
    title_size: u32,

    /// Border as a fraction of the canvas
    #[arg(short, long, default_value_t = 0.1)]
    border: f32,

    /// Ease the within-month blend instead of interpolating linearly
    #[arg(long)]
    smooth: bool,

    /// Generate a single static image of per-year average anomalies
    #[arg(short = 'S', long = "static")]
    static_image: bool,

    /// Render the first frame only
    #[arg(long)]
    debug: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dataset = Dataset::from_path(&cli.dataset)
        .with_context(|| format!("failed to load dataset '{}'", cli.dataset.display()))?;

    info!(
        years = dataset.year_count(),
        first = dataset.first_year(),
        last = dataset.last_year(),
        "Loaded dataset"
    );

    let easing = if cli.smooth {
        Easing::Smooth
    } else {
        Easing::Linear
    };

    let animation = Animation::new()
        .size(cli.size)
        .title_size(cli.title_size)
        .border(cli.border)
        .duration(cli.duration)
        .easing(easing)
        .build(dataset)
        .context("invalid animation configuration")?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory '{}'", cli.output.display()))?;

    if cli.static_image {
        let path = cli.output.join("all.png");
        info!("Generating static average image");

        let frame = animation.render_average()?;
        PngEncoder::write_to_file(&frame, &path)
            .with_context(|| format!("failed to write '{}'", path.display()))?;

        info!(path = %path.display(), "Done");
        return Ok(());
    }

    let frames = if cli.debug {
        1
    } else {
        animation.frame_count()
    };

    for frame in 0..frames {
        let path = cli.output.join(format!("{frame:07}.png"));
        info!("Generating frame {}/{}", frame + 1, frames);

        let image = animation.render_frame(frame)?;
        PngEncoder::write_to_file(&image, &path)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }

    info!(frames, output = %cli.output.display(), "Done");
    Ok(())
}
