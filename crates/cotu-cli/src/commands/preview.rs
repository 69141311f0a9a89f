//! Preview command - show records, statistics and duplicates.

use clap::Args;
use console::style;

use cotu_core::models::record::FacturaRecord;
use cotu_core::report::{find_duplicates, summarize};

use super::paths::load_config;
use super::scan::{self, ScanArgs};

/// Rows shown before the table is truncated.
const PREVIEW_LIMIT: usize = 100;

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    scan: ScanArgs,
}

pub fn run(args: PreviewArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path);
    let root = args.scan.resolve_root(&config)?;

    let (records, _) = scan::scan(&args.scan, &root, &config)?;
    if records.is_empty() {
        println!(
            "{} No invoices found for the selected criteria",
            style("ℹ").blue()
        );
        return Ok(());
    }

    print_table(&records);

    println!();
    println!("{}", style("Resumen por aseguradora").bold());
    println!("{}", summarize(&records));

    println!();
    let duplicates = find_duplicates(&records);
    if duplicates.is_empty() {
        println!("{} No duplicated invoice numbers", style("✓").green());
    } else {
        println!(
            "{} {} duplicated invoice numbers:",
            style("⚠").yellow(),
            duplicates.len()
        );
        for message in &duplicates {
            println!("  - {message}");
        }
    }

    Ok(())
}

fn print_table(records: &[FacturaRecord]) {
    let shown = &records[..records.len().min(PREVIEW_LIMIT)];

    println!(
        "{}",
        style(format!(
            "{:<6} {:<14} {:<18} {:<12} {:<20} {}",
            "AÑO", "MES", "FECHA", "N° FACTURA", "DETALLE", "COMPAÑÍA"
        ))
        .bold()
    );
    for record in shown {
        println!(
            "{:<6} {:<14} {:<18} {:<12} {:<20} {}",
            record.year,
            record.month,
            record.day_folder,
            record.invoice_id,
            record.detail,
            record.insurer
        );
    }

    if records.len() > PREVIEW_LIMIT {
        println!(
            "... showing {} of {} invoices",
            PREVIEW_LIMIT,
            records.len()
        );
    } else {
        println!("Total: {} invoices", records.len());
    }
}
