//! Shared scan arguments and the extract-then-filter pipeline.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cotu_core::dates::parse_report_date;
use cotu_core::models::config::AppConfig;
use cotu_core::models::record::{FacturaRecord, ReportType};
use cotu_core::report::filter_by_type;
use cotu_core::FacturaExtractor;

/// Arguments shared by the report and preview commands.
#[derive(Args)]
pub struct ScanArgs {
    /// Root folder of the year (or its parent); defaults to the last
    /// scanned folder from the configuration
    pub root: Option<PathBuf>,

    /// Report granularity
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "year")]
    pub report_type: ReportType,

    /// Start of the date range, DD/MM/YYYY
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// End of the date range, DD/MM/YYYY (for day reports the start
    /// date is used)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Count every folder, not only those named COTU*
    #[arg(long)]
    pub all_folders: bool,
}

impl ScanArgs {
    /// The folder to scan: the positional argument, or the last scanned
    /// folder remembered in the configuration.
    pub fn resolve_root(&self, config: &AppConfig) -> anyhow::Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        if !config.last_folder.is_empty() {
            info!("using last scanned folder: {}", config.last_folder);
            return Ok(PathBuf::from(&config.last_folder));
        }
        anyhow::bail!("no folder given and no previously scanned folder remembered")
    }

    /// Validate the date range for the selected granularity.
    ///
    /// Year reports take no range. Month, week and day reports require
    /// `--from`; month and week also require `--to`, while a day report's
    /// end bound is its start date.
    pub fn validate_range(&self) -> anyhow::Result<(Option<NaiveDate>, Option<NaiveDate>)> {
        if self.report_type == ReportType::Year {
            return Ok((None, None));
        }

        let from_text = self
            .from
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--from is required for {} reports", self.report_type))?;
        let from = parse_report_date(from_text)
            .ok_or_else(|| anyhow::anyhow!("invalid --from date (use DD/MM/YYYY): {from_text}"))?;

        let to = if self.report_type == ReportType::Day {
            from
        } else {
            let to_text = self
                .to
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--to is required for {} reports", self.report_type))?;
            let to = parse_report_date(to_text)
                .ok_or_else(|| anyhow::anyhow!("invalid --to date (use DD/MM/YYYY): {to_text}"))?;
            if to < from {
                anyhow::bail!("--to must not precede --from");
            }
            to
        };

        Ok((Some(from), Some(to)))
    }
}

/// Extract records from `root` and apply the post-hoc granularity filter.
///
/// Returns the surviving records together with the validated date range
/// (used downstream for output file naming).
pub fn scan(
    args: &ScanArgs,
    root: &Path,
    config: &AppConfig,
) -> anyhow::Result<(Vec<FacturaRecord>, (Option<NaiveDate>, Option<NaiveDate>))> {
    let (from, to) = args.validate_range()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Scanning folders...");
    let ticker = spinner.clone();

    let only_cotu = !args.all_folders && config.only_cotu;
    let mut extractor = FacturaExtractor::new()
        .with_only_cotu(only_cotu)
        .with_progress(move |n| ticker.set_message(format!("Scanning... {n} folders")));

    let records = extractor.extract(root, from, to)?;
    spinner.finish_and_clear();
    info!(records = records.len(), "extraction finished");

    let records = filter_by_type(
        records,
        args.report_type,
        args.from.as_deref(),
        args.to.as_deref(),
    );

    Ok((records, (from, to)))
}
