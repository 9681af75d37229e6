mod config;
mod dispatch;
mod error;
mod events;
mod handlers;
mod log;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use config::Config;
use dispatch::run_demo;
use events::EventSource;
use handlers::Handler;

/// Dispatch a seeded stream of input events through a chain of handlers.
#[derive(Debug, Parser)]
#[command(name = "evchain", version)]
struct Cli {
    /// Seed for the event generator
    #[arg(long)]
    seed: Option<u64>,

    /// Handler chain: `classic`, `pipeline`, or roles outermost first (e.g. `timer,keypress,mouse`)
    #[arg(long)]
    chain: Option<String>,

    /// Maximum number of events dispatched per run
    #[arg(long)]
    limit: Option<usize>,

    /// Skip the second, debug-wrapped run
    #[arg(long)]
    no_debug_run: bool,

    /// Print a JSON report of both runs at the end
    #[arg(long)]
    json: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load(),
    }
    .with_overrides(cli.seed, cli.chain, cli.limit, cli.no_debug_run);

    config.validate()?;
    let roles = config.roles()?;
    let seed = config.seed();
    log::log(&format!("seed={} limit={:?}", seed, config.limit));

    let mut source = EventSource::new(seed, config.weights)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let chain = Handler::from_roles(&roles);
    let report = run_demo(chain, &mut source, seed, config.limit, config.debug_run(), &mut out)?;

    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    }

    log::log("=== evchain finished ===");
    Ok(())
}
