//! folio-motion - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use folio_motion::model::{AppError, PageFixture};
use folio_motion::simulate::{self, Resize, ScrollScript};

/// Replay a page fixture through a scroll script and print reveal and scroll events
#[derive(Parser, Debug)]
#[command(name = "folio-motion")]
#[command(version)]
#[command(about = "Replay scroll-triggered reveal animations over a page fixture")]
pub struct Args {
    /// Path to the JSON page fixture
    pub fixture: PathBuf,

    /// Pixels scrolled per frame
    #[arg(long, default_value_t = 40.0)]
    pub scroll_step: f64,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Frame interval in milliseconds (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub frame_ms: Option<u64>,

    /// Frame at which the viewport is resized
    #[arg(long, requires = "resize_to")]
    pub resize_at: Option<u32>,

    /// New viewport size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size, requires = "resize_at")]
    pub resize_to: Option<(f64, f64)>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_size(raw: &str) -> Result<(f64, f64), String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {raw:?}"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid dimension {s:?}"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = folio_motion::config::load_config_with_precedence(args.config.clone())
            .map_err(AppError::from)?;
        let merged = folio_motion::config::merge_config(config_file);
        let with_env = folio_motion::config::apply_env_overrides(merged);
        folio_motion::config::apply_cli_overrides(with_env, args.frame_ms)
    };

    folio_motion::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut doc = PageFixture::load(&args.fixture)
        .and_then(|fixture| fixture.build())
        .map_err(AppError::from)?;

    let script = ScrollScript {
        step_px: args.scroll_step,
        frames: args.frames,
        frame_interval: config.frame_interval(),
        resize: args
            .resize_at
            .zip(args.resize_to)
            .map(|(frame, (width, height))| Resize {
                frame,
                width,
                height,
            }),
    };

    let timeline = simulate::run(&mut doc, &script, config.reveal_timing());
    println!("{timeline}");

    Ok(())
}
