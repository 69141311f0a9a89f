//! Report-generation history.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of history entries kept on disk.
pub const HISTORY_LIMIT: usize = 50;

/// One generated report. The JSON field names match the
/// `historial_reportes.json` written by earlier versions of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Generation timestamp, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "fecha")]
    pub timestamp: String,

    /// Report granularity label (`Año`, `Mes`, `Semana`, `Día`).
    #[serde(rename = "tipo")]
    pub report_type: String,

    /// Output file name.
    #[serde(rename = "archivo")]
    pub file_name: String,

    /// Full output path.
    #[serde(rename = "ruta")]
    pub path: String,

    /// Number of exported records.
    #[serde(rename = "total_facturas")]
    pub total_records: usize,
}

/// Load the history list, newest first. A missing or unreadable file is
/// an empty history, never an error.
pub fn load_history(path: &Path) -> Vec<HistoryEntry> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(e) => {
            debug!("no report history at {}: {e}", path.display());
            Vec::new()
        }
    }
}

/// Prepend `entry` to the history at `path`, truncating to
/// [`HISTORY_LIMIT`] entries.
pub fn append_history(path: &Path, entry: HistoryEntry) -> Result<(), std::io::Error> {
    let mut history = load_history(path);
    history.insert(0, entry);
    history.truncate(HISTORY_LIMIT);
    let content = serde_json::to_string_pretty(&history)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            timestamp: format!("2025-12-23 10:00:{n:02}"),
            report_type: "Año".into(),
            file_name: format!("cotus_{n}.csv"),
            path: format!("/srv/facturacion/cotus_{n}.csv"),
            total_records: n,
        }
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_history(&dir.path().join("none.json")), vec![]);
    }

    #[test]
    fn test_corrupt_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historial_reportes.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_history(&path), vec![]);
    }

    #[test]
    fn test_append_prepends_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historial_reportes.json");
        append_history(&path, entry(1)).unwrap();
        append_history(&path, entry(2)).unwrap();

        let history = load_history(&path);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], entry(2));
        assert_eq!(history[1], entry(1));
    }

    #[test]
    fn test_history_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historial_reportes.json");
        for n in 0..HISTORY_LIMIT + 5 {
            append_history(&path, entry(n)).unwrap();
        }
        assert_eq!(load_history(&path).len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_legacy_field_names_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historial_reportes.json");
        append_history(&path, entry(7)).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"fecha\""));
        assert!(raw.contains("\"tipo\""));
        assert!(raw.contains("\"archivo\""));
        assert!(raw.contains("\"ruta\""));
        assert!(raw.contains("\"total_facturas\""));
    }
}
