use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mercs")]
#[command(version)]
#[command(about = "Hearthstone Mercenaries visitor-progress tracker")]
pub struct Args {
    /// Config file (defaults are used when missing)
    #[arg(short, long, default_value = "mercs.toml", global = true)]
    pub config: PathBuf,

    /// Directory holding preferences, caches and plugin output
    #[arg(long, env = "MERCS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge two visitor lists without touching any storage
    Reconcile {
        /// Visitors freshly read from memory (JSON list)
        memory: PathBuf,
        /// Previously saved visitors (JSON list)
        saved: PathBuf,
        /// Write the merged list here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Refresh the collection once and persist the reconciled visitors
    Refresh {
        /// Print the refreshed snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the persisted visitor progress
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Follow scene changes and refresh when entering Mercenaries scenes
    Watch,
}
