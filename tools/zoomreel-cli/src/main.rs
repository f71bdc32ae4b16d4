//! ZoomReel CLI: command-line interface for automatic camera direction.
//!
//! Usage:
//!   zoomreel analyze <PATH>    Compute focus areas, camera motions and spotlights
//!   zoomreel validate <PATH>   Validate a project document
//!   zoomreel info <PATH>       Show project information
//!   zoomreel preview <PATH>    Print sampled camera transforms

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zoomreel_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "zoomreel",
    about = "Automatic zoom, pan and spotlight direction for screen recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the auto-director on a project and write the schedule
    Analyze {
        /// Path to the project JSON document
        path: PathBuf,

        /// Schedule output path (defaults to `<project>.schedule.json`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace the project's events with a JSONL event stream
        #[arg(long)]
        events: Option<PathBuf>,

        /// Disable automatic zoom (spotlights only)
        #[arg(long)]
        no_zoom: bool,

        /// Disable spotlights
        #[arg(long)]
        no_spotlight: bool,

        /// Override the maximum zoom factor
        #[arg(long)]
        max_zoom: Option<f64>,
    },

    /// Validate a project document
    Validate {
        /// Path to the project JSON document
        path: PathBuf,
    },

    /// Show project information
    Info {
        /// Path to the project JSON document
        path: PathBuf,
    },

    /// Print sampled camera transforms for a project
    Preview {
        /// Path to the project JSON document
        path: PathBuf,

        /// Sample rate (defaults to the configured preview FPS)
        #[arg(long)]
        fps: Option<f64>,

        /// Emit one JSON object per frame instead of CSS transforms
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    zoomreel_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Analyze {
            path,
            output,
            events,
            no_zoom,
            no_spotlight,
            max_zoom,
        } => commands::analyze::run(
            &config,
            path,
            output,
            events,
            commands::analyze::Overrides {
                no_zoom,
                no_spotlight,
                max_zoom,
            },
        ),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Info { path } => commands::info::run(path),
        Commands::Preview { path, fps, json } => {
            commands::preview::run(path, fps.unwrap_or(config.preview_fps), json)
        }
    }
}
