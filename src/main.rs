use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use facekeys::config::Config;
use facekeys::keys::{KeySink, LogSink};
use facekeys::morse::MorseTable;
use facekeys::orchestrator::GestureOrchestrator;
use facekeys::overlay::{Overlay, OverlayRenderer};
use facekeys::{pipeline, source};

#[derive(Parser)]
#[command(name = "facekeys", about = "Type with your face")]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Classify landmark frames and press keys (default)
    Run(RunArgs),
    /// Print the Morse table
    Table,
}

#[derive(clap::Args, Default)]
struct RunArgs {
    /// NDJSON landmark frames, stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Log chords instead of pressing them
    #[arg(long)]
    dry_run: bool,

    /// Show the pending Morse code on a status line
    #[arg(long)]
    overlay: bool,
}

#[hotpath::main]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config);

    match cli.command {
        Some(Command::Table) => {
            print_table();
            Ok(())
        }
        Some(Command::Run(args)) => run(config, args),
        None => run(config, RunArgs::default()),
    }
}

fn print_table() {
    for (code, key) in MorseTable::standard().entries() {
        println!("{:<8} {}", code, key);
    }
}

#[cfg(feature = "inject")]
fn key_sink(dry_run: bool) -> anyhow::Result<Box<dyn KeySink>> {
    if dry_run {
        return Ok(Box::new(LogSink));
    }
    let sink = facekeys::keys::EnigoSink::new().context("key injection unavailable")?;
    Ok(Box::new(sink))
}

#[cfg(not(feature = "inject"))]
fn key_sink(dry_run: bool) -> anyhow::Result<Box<dyn KeySink>> {
    if !dry_run {
        info!("built without key injection, logging chords instead");
    }
    Ok(Box::new(LogSink))
}

fn run(config: Config, args: RunArgs) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

    let reader = source::open(args.input.as_deref()).context("failed to open landmark input")?;
    let sink = key_sink(args.dry_run)?;
    let mut orchestrator = GestureOrchestrator::new(config.gestures.clone(), sink);

    let renderer_handle = if args.overlay || config.overlay.enabled {
        let (overlay, rx) = Overlay::new();
        orchestrator = orchestrator.with_overlay(overlay);
        Some(OverlayRenderer::new().spawn(rx))
    } else {
        None
    };

    match &args.input {
        Some(path) => info!(input = %path.display(), "reading landmark frames"),
        None => info!("reading landmark frames from stdin"),
    }
    let result = pipeline::run(reader, &mut orchestrator, config.pipeline.backpressure, running);

    // Dropping the orchestrator closes the overlay channel
    drop(orchestrator);
    if let Some(renderer) = renderer_handle {
        renderer.join();
    }

    result.context("landmark pipeline stopped")
}
