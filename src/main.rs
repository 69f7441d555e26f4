//! vrwidgets - headless runner for the diegetic widget toolkit
//!
//! Builds two themed windows, drags one against the other until they dock,
//! and prints a JSON summary of the resulting scene.

mod config;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use std::path::PathBuf;
use tracing::info;
use vrwidgets_testkit::JsonlSink;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless docking run for vrwidgets", long_about = None)]
struct Args {
    /// TOML file with [geometry], [collider], [docking] and [scenario] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TOML theme mapping color keys to RGBA values
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Override the number of simulated frames
    #[arg(long)]
    frames: Option<u64>,

    /// Write every docking transition to this newline-delimited JSON file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Fail on unreadable or invalid config and theme files instead of
    /// falling back to defaults
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    // WARN by default, override with RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting vrwidgets v{}", env!("CARGO_PKG_VERSION"));
    vrwidgets_ui3d::init()?;

    let mut config = match (&args.config, args.strict) {
        (Some(path), true) => AppConfig::load_strict(path)?,
        (Some(path), false) => AppConfig::load_from_path(path),
        (None, _) => AppConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.scenario.frames = frames;
    }
    let theme = config::load_theme(args.theme.as_deref(), args.strict)?;

    let mut sink = args
        .events
        .as_ref()
        .map(|path| {
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))
        })
        .transpose()?;

    let report = scenario::run(&config, theme, sink.as_mut())?;
    let json = serde_json::to_string_pretty(&report).context("failed to encode summary")?;
    println!("{json}");
    Ok(())
}
