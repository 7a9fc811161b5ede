mod cli;
mod commands;
mod display;
mod shutdown;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mercs_core::Config;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::commands::AppContext;

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("mercs"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_config(path: &std::path::Path) -> Config {
    match Config::load(path) {
        Ok(c) => {
            info!("Loaded config from {}", path.display());
            c
        }
        Err(e) if e.is_not_found() => {
            debug!("No config at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "mercs=debug" } else { "mercs=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args.config);
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    debug!("Data directory: {}", data_dir.display());
    let ctx = AppContext::new(config, &data_dir);

    match args.command {
        Command::Reconcile {
            memory,
            saved,
            output,
        } => commands::reconcile::run(&memory, &saved, output.as_deref()),
        Command::Refresh { json } => commands::refresh::run(&ctx, json),
        Command::Show { json } => commands::show::run(&ctx, json),
        Command::Watch => commands::watch::run(&ctx),
    }
}
