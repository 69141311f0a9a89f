//! Report command - scan a folder tree and export a CSV report.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::warn;

use cotu_core::models::history::{append_history, HistoryEntry};
use cotu_core::models::record::{FacturaRecord, ReportType};
use cotu_core::report::find_duplicates;

use super::paths::{history_file, is_system_path, load_config, store_config};
use super::scan::{self, ScanArgs};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    scan: ScanArgs,

    /// Export only the condensed FECHA/COTU/ASEGURADORA columns
    #[arg(long)]
    condensed: bool,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    force: bool,

    /// Write the CSV here instead of into the scanned folder
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path);
    let root = args.scan.resolve_root(&config)?;

    if is_system_path(&root) {
        anyhow::bail!(
            "refusing to scan or write inside a system folder: {}",
            root.display()
        );
    }

    let (mut records, range) = scan::scan(&args.scan, &root, &config)?;
    if records.is_empty() {
        anyhow::bail!("no invoices found for the selected criteria");
    }

    let duplicates = find_duplicates(&records);
    if !duplicates.is_empty() {
        warn!("{} duplicated invoice numbers in this report", duplicates.len());
    }

    let condensed = args.condensed || config.condensed;
    let output_path = match &args.output {
        Some(path) => path.clone(),
        None => root.join(output_file_name(&root, args.scan.report_type, range)),
    };
    if output_path.exists() && !args.force {
        anyhow::bail!(
            "output file already exists (use --force to overwrite): {}",
            output_path.display()
        );
    }

    sort_for_export(&mut records, condensed);
    write_csv(&output_path, &records, condensed)?;

    let file_name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let entry = HistoryEntry {
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        report_type: args.scan.report_type.label().to_string(),
        file_name,
        path: output_path.display().to_string(),
        total_records: records.len(),
    };
    if let Err(e) = ensure_parent(&history_file()).and_then(|_| append_history(&history_file(), entry)) {
        warn!("could not save the report history: {e}");
    }

    config.last_folder = root.display().to_string();
    if let Err(e) = store_config(&config, config_path) {
        warn!("could not save the configuration: {e}");
    }

    println!(
        "{} Report written to {}",
        style("✓").green(),
        output_path.display()
    );
    println!("  {} invoices", records.len());
    if !duplicates.is_empty() {
        println!(
            "{} {} duplicated invoice numbers, run the preview command for details",
            style("⚠").yellow(),
            duplicates.len()
        );
    }

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), std::io::Error> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Output file name for the report: `cotus_{year}.csv` for whole years,
/// `cotus_dia_{date}.csv` for days, `cotus_{mes|semana}_{from}_{to}.csv`
/// for ranges.
fn output_file_name(
    root: &Path,
    report_type: ReportType,
    range: (Option<NaiveDate>, Option<NaiveDate>),
) -> String {
    let year_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match (report_type, range.0, range.1) {
        (ReportType::Year, _, _) => format!("cotus_{year_name}.csv"),
        (ReportType::Day, Some(from), _) => format!("cotus_dia_{}.csv", from.format("%Y%m%d")),
        (tipo, Some(from), Some(to)) => format!(
            "cotus_{}_{}_{}.csv",
            tipo.slug(),
            from.format("%Y%m%d"),
            to.format("%Y%m%d")
        ),
        (tipo, _, _) => format!("cotus_{}_{year_name}.csv", tipo.slug()),
    }
}

/// Sort rows the way the spreadsheet reports order them: date folder,
/// then month, then invoice id (condensed: date, id, insurer).
fn sort_for_export(records: &mut [FacturaRecord], condensed: bool) {
    if condensed {
        records.sort_by(|a, b| {
            (&a.day_folder, &a.invoice_id, &a.insurer).cmp(&(&b.day_folder, &b.invoice_id, &b.insurer))
        });
    } else {
        records.sort_by(|a, b| {
            (&a.day_folder, &a.month, &a.invoice_id).cmp(&(&b.day_folder, &b.month, &b.invoice_id))
        });
    }
}

/// Write the records as CSV with a UTF-8 BOM so spreadsheet programs
/// pick up the accented column headers.
fn write_csv(path: &Path, records: &[FacturaRecord], condensed: bool) -> anyhow::Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    buf.extend_from_slice(b"\xef\xbb\xbf");
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        if condensed {
            for record in records {
                writer.serialize(record.condensed())?;
            }
        } else {
            for record in records {
                writer.serialize(record)?;
            }
        }
        writer.flush()?;
    }
    fs::write(path, buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_output_file_names() {
        let root = Path::new("/srv/FACTURACION/2025");
        assert_eq!(
            output_file_name(root, ReportType::Year, (None, None)),
            "cotus_2025.csv"
        );
        assert_eq!(
            output_file_name(
                root,
                ReportType::Day,
                (Some(day(2025, 12, 23)), Some(day(2025, 12, 23)))
            ),
            "cotus_dia_20251223.csv"
        );
        assert_eq!(
            output_file_name(
                root,
                ReportType::Month,
                (Some(day(2025, 12, 1)), Some(day(2025, 12, 31)))
            ),
            "cotus_mes_20251201_20251231.csv"
        );
        assert_eq!(
            output_file_name(
                root,
                ReportType::Week,
                (Some(day(2025, 12, 22)), Some(day(2025, 12, 28)))
            ),
            "cotus_semana_20251222_20251228.csv"
        );
    }

    #[test]
    fn test_csv_headers() {
        let dir = tempfile::tempdir().unwrap();
        let record = FacturaRecord {
            year: "2025".into(),
            month: "12-DICIEMBRE".into(),
            day_folder: "23 DE DICIEMBRE".into(),
            invoice_id: "COTU001".into(),
            detail: String::new(),
            insurer: "SOLIDARIA".into(),
        };

        let full = dir.path().join("full.csv");
        write_csv(&full, &[record.clone()], false).unwrap();
        let content = fs::read_to_string(&full).unwrap();
        assert!(content.starts_with('\u{feff}'));
        assert!(content.contains("AÑO,MES,FECHA DE LA FACTURA,N° FACTURA,DETALLE COMPLETO,COMPAÑÍA"));

        let condensed = dir.path().join("condensed.csv");
        write_csv(&condensed, &[record], true).unwrap();
        let content = fs::read_to_string(&condensed).unwrap();
        assert!(content.contains("FECHA,COTU,ASEGURADORA"));
        assert!(!content.contains("DETALLE"));
    }
}
