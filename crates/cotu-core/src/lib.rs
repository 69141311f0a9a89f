//! Core library for COTU invoice folder reporting.
//!
//! This crate provides:
//! - Folder-tree scanning for COTU invoice directories
//! - Best-effort date inference from Spanish folder names
//! - Date-range filtering per report granularity
//! - Duplicate detection and per-insurer statistics

pub mod dates;
pub mod error;
pub mod extract;
pub mod models;
pub mod report;

pub use error::{CotuError, ExtractError, Result};
pub use models::config::AppConfig;
pub use models::history::HistoryEntry;
pub use models::record::{CondensedRecord, FacturaRecord, ReportType};
pub use dates::{parse_folder_date, parse_report_date, resolve_month};
pub use extract::FacturaExtractor;
pub use report::{filter_by_type, find_duplicates, summarize};
