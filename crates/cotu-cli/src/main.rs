//! CLI application for COTU invoice folder reporting.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, history, preview, report};

/// COTU folder reports - scan invoice folder trees and export CSV reports
#[derive(Parser)]
#[command(name = "cotu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a CSV report from an invoice folder tree
    Report(report::ReportArgs),

    /// Show records, statistics and duplicates without writing files
    Preview(preview::PreviewArgs),

    /// List previously generated reports
    History(history::HistoryArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Report(args) => report::run(args, cli.config.as_deref()),
        Commands::Preview(args) => preview::run(args, cli.config.as_deref()),
        Commands::History(args) => history::run(args),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
