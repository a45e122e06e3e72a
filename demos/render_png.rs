//! Render one viewport of the sphere scene to a PNG file
//!
//! Example:
//!   render_png --width 800 --height 600 --density 2 --output sphere.png

use anyhow::Result;
use clap::Parser;
use raycrate::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Render the sphere scene for a single viewport")]
struct Args {
    /// Logical viewport width
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Logical viewport height
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Device pixels per logical unit
    #[arg(long, default_value_t = 1.0)]
    density: f64,

    /// Render rows sequentially instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Output PNG path
    #[arg(long, short, default_value = "sphere.png")]
    output: PathBuf,

    /// Log filter, e.g. "debug"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig::default().with_filter(args.log.clone()));

    let viewport = Viewport::new(args.width, args.height, args.density)?;
    let renderer = Renderer::new(RenderConfig::default().with_parallel(!args.sequential));

    let start = Instant::now();
    let image = renderer.render(&viewport, &Scene::default())?;
    let (w, h) = image.dimensions();
    log::info!("rendered {}x{} device pixels in {:?}", w, h, start.elapsed());

    raycrate_demos::save_png(image, &args.output)?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}
