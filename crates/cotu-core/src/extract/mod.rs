//! Folder-tree scanning for COTU invoice records.

mod derive;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::dates::parse_folder_date;
use crate::error::ExtractError;
use crate::models::record::FacturaRecord;

use derive::derive_context;

/// Maximum scan depth below the root: the five-level
/// YEAR/MONTH/DAY/INSURER/INVOICE hierarchy plus one level of margin.
/// Bounds the walk on deep or networked trees.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Depth from which the COTU name filter prunes directory listings before
/// recursion, so unwanted branches are never walked on slow storage.
const COTU_FILTER_DEPTH: usize = 4;

/// Interval, in visited folders, between progress notifications.
const PROGRESS_INTERVAL: usize = 50;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Scans an invoice folder tree and derives one record per invoice folder.
///
/// The only fatal error is a missing root; individual malformed folders
/// degrade to minimal records and never abort the scan.
pub struct FacturaExtractor {
    only_cotu: bool,
    max_depth: usize,
    progress: Option<Box<dyn FnMut(usize) + Send>>,
}

impl FacturaExtractor {
    pub fn new() -> Self {
        Self {
            only_cotu: true,
            max_depth: DEFAULT_MAX_DEPTH,
            progress: None,
        }
    }

    /// Restrict records to folders whose name starts with `COTU`
    /// (case-insensitive). Enabled by default; when disabled, every
    /// visited folder yields a record.
    pub fn with_only_cotu(mut self, only_cotu: bool) -> Self {
        self.only_cotu = only_cotu;
        self
    }

    /// Override the maximum scan depth below the root.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Install a sink notified with the running count of visited folders,
    /// once every fifty folders.
    pub fn with_progress(mut self, sink: impl FnMut(usize) + Send + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    /// Walk the tree rooted at `root` and collect one record per matching
    /// folder.
    ///
    /// When `date_from`/`date_to` are given, records whose folder date
    /// parses and falls outside the inclusive range are skipped; records
    /// whose date cannot be parsed are kept.
    pub fn extract(
        &mut self,
        root: &Path,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<FacturaRecord>> {
        if !root.exists() {
            return Err(ExtractError::RootNotFound(root.to_path_buf()));
        }

        let mut walk = Walk {
            only_cotu: self.only_cotu,
            max_depth: self.max_depth,
            root_name: folder_name(root),
            date_from,
            date_to,
            visited: 0,
            records: Vec::new(),
            progress: self.progress.as_mut(),
        };
        walk.visit(root, 0)?;

        info!(
            records = walk.records.len(),
            folders = walk.visited,
            "scan finished"
        );
        Ok(walk.records)
    }
}

impl Default for FacturaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// State threaded through one recursive walk.
struct Walk<'a> {
    only_cotu: bool,
    max_depth: usize,
    root_name: String,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    visited: usize,
    records: Vec<FacturaRecord>,
    progress: Option<&'a mut Box<dyn FnMut(usize) + Send>>,
}

impl Walk<'_> {
    fn visit(&mut self, dir: &Path, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Ok(());
        }

        let mut subdirs = list_subdirs(dir)?;
        if self.only_cotu && depth >= COTU_FILTER_DEPTH {
            subdirs.retain(|(name, _)| is_cotu_name(name));
        }

        self.visited += 1;
        if self.visited % PROGRESS_INTERVAL == 0 {
            if let Some(progress) = self.progress.as_mut() {
                progress(self.visited);
            }
        }

        for (name, path) in &subdirs {
            if self.only_cotu && !is_cotu_name(name) {
                continue;
            }
            self.record(name, path);
        }
        for (_, path) in &subdirs {
            self.visit(path, depth + 1)?;
        }
        Ok(())
    }

    /// Derive and store the record for one invoice folder, honoring the
    /// optional date-range pre-filter.
    fn record(&mut self, name: &str, path: &Path) {
        let mut tokens = name.split_whitespace();
        let invoice_id = tokens.next().unwrap_or(name).to_string();
        let detail = tokens.collect::<Vec<_>>().join(" ");

        let parts = path_parts(path);
        let ctx = derive_context(&parts, &self.root_name);

        if self.date_from.is_some() || self.date_to.is_some() {
            if let Some(date) = parse_folder_date(&ctx.day, &ctx.month, &ctx.year) {
                if self.date_from.is_some_and(|from| date < from) {
                    debug!("skipping {name}: {date} before range");
                    return;
                }
                if self.date_to.is_some_and(|to| date > to) {
                    debug!("skipping {name}: {date} after range");
                    return;
                }
            }
        }

        self.records.push(FacturaRecord {
            year: ctx.year,
            month: ctx.month,
            day_folder: ctx.day,
            invoice_id,
            detail,
            insurer: ctx.insurer,
        });
    }
}

/// List immediate subdirectories as (name, path), sorted by name so scans
/// are deterministic across filesystems.
fn list_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let read_dir = fs::read_dir(dir).map_err(|source| ExtractError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut subdirs = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| ExtractError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    subdirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(subdirs)
}

fn is_cotu_name(name: &str) -> bool {
    name.to_uppercase().starts_with("COTU")
}

/// The root folder's own name, used as the year anchor for shallow trees.
fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Filesystem path components as owned strings.
fn path_parts(path: &Path) -> Vec<String> {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}
