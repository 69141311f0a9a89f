//! History command - list previously generated reports.

use clap::Args;
use console::style;

use cotu_core::models::history::load_history;

use super::paths::history_file;

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Show at most this many entries
    #[arg(short, long, default_value = "20")]
    limit: usize,
}

pub fn run(args: HistoryArgs) -> anyhow::Result<()> {
    let entries = load_history(&history_file());
    if entries.is_empty() {
        println!("{} No reports generated yet", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "{:<20} {:<8} {:>9}  {}",
            "Fecha", "Tipo", "Facturas", "Archivo"
        ))
        .bold()
    );
    for entry in entries.iter().take(args.limit) {
        println!(
            "{:<20} {:<8} {:>9}  {}",
            entry.timestamp, entry.report_type, entry.total_records, entry.path
        );
    }

    Ok(())
}
