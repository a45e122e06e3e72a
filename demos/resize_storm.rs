//! Replay a burst of resize notifications through the render coordinator
//!
//! Example:
//!   resize_storm --sizes 320x240,640x480,1024x768,800x600 --density 2 --output last.png

use anyhow::{Context, Result};
use clap::Parser;
use raycrate::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Feed viewport resizes to the coordinator and report what gets presented")]
struct Args {
    /// Comma separated logical sizes, e.g. 320x240,640x480
    #[arg(long, value_delimiter = ',', default_value = "320x240,640x480,1024x768,800x600")]
    sizes: Vec<String>,

    /// Device pixels per logical unit
    #[arg(long, default_value_t = 1.0)]
    density: f64,

    /// Worker threads (defaults to one per CPU)
    #[arg(long)]
    threads: Option<usize>,

    /// Delay between resize notifications in milliseconds
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Seconds to wait for outstanding jobs
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Save the frame left on screen as PNG
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log filter, e.g. "raycrate_coordinator=debug"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig::default().with_filter(args.log.clone()));

    let mut config = CoordinatorConfig::default();
    if let Some(threads) = args.threads {
        config = config.with_thread_pool(ThreadPoolConfig::default().with_threads(threads));
    }
    let mut coordinator = RenderCoordinator::new(Arc::new(Scene::default()), config)?;
    let mut frame = LatestFrame::new();
    let mut summary = PollSummary::default();

    for size in &args.sizes {
        let (width, height) = raycrate_demos::parse_size(size)?;
        let viewport = Viewport::new(width, height, args.density)?;

        frame.set_display(viewport);
        let job = coordinator.on_viewport_changed(viewport);
        log::info!("resize to {} -> {}", size, job);

        summary += coordinator.poll(&mut frame);
        if args.interval_ms > 0 {
            std::thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    summary += coordinator.wait_idle(Duration::from_secs(args.timeout_secs), &mut frame);
    log::info!(
        "presented {}, discarded {}, failed {}, still running {}",
        summary.presented,
        summary.discarded,
        summary.failed,
        coordinator.in_flight()
    );

    if let Some(path) = &args.output {
        let image = frame.take().context("no frame was presented")?;
        raycrate_demos::save_png(image, path)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
