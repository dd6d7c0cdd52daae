//! cityguide — static travel-guide site generator.
//!
//! # Usage
//!
//! ```text
//! cityguide                         # build the site rooted at the current directory
//! cityguide build [--root <dir>] [--content <dir>] [--templates <dir>]
//!                 [--static <dir>] [--out <dir>] [--dry-run]
//! cityguide map [--root <dir>] [--content <dir>] [--pretty]
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-file detail.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{build::BuildArgs, map::MapArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cityguide",
    version,
    about = "Generate a static travel-guide website from YAML content",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the whole site: pages, map data and static assets.
    Build(BuildArgs),

    /// Print the map dataset as JSON without writing anything.
    Map(MapArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        None => BuildArgs::default().run(),
        Some(Commands::Build(args)) => args.run(),
        Some(Commands::Map(args)) => args.run(),
    }
}
