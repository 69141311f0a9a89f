//! Data models shared between the engine and its consumers.

pub mod config;
pub mod history;
pub mod record;

pub use config::AppConfig;
pub use history::HistoryEntry;
pub use record::{CondensedRecord, FacturaRecord, ReportType};
