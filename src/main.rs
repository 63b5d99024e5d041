//! ReadSight binary entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use readsight::cli;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "readsight",
    version,
    about = "AI readability scorer for web pages",
    long_about = "Renders a page with headless Chromium and scores its structure, \
                  readability, and metadata into a single 0-100 AI readability score.\n\
                  Run without a subcommand for the interactive prompt."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Suppress progress output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Extra diagnostic output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single URL and print its score report
    Analyze {
        /// Page to evaluate (http or https)
        url: String,
    },
    /// Check that headless Chromium is available
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Output helpers read these as process-wide flags.
    if cli.json {
        std::env::set_var("READSIGHT_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("READSIGHT_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("READSIGHT_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("READSIGHT_NO_COLOR", "1");
    }

    let default_filter = if cli.verbose { "readsight=debug" } else { "readsight=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("READSIGHT_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Command::Analyze { url }) => cli::analyze_cmd::run(&url).await,
        Some(Command::Doctor) => cli::doctor::run().await,
        None => cli::repl::run().await,
    }
}
