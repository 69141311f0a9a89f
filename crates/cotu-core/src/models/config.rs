//! Persisted application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// User configuration persisted between runs.
///
/// The JSON field names match the `config.json` written by earlier
/// versions of the tool, so existing files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Last scanned root folder.
    #[serde(rename = "ultima_carpeta")]
    pub last_folder: String,

    /// Export only the condensed FECHA/COTU/ASEGURADORA columns.
    #[serde(rename = "formato_resumido")]
    pub condensed: bool,

    /// Only count folders whose name starts with COTU.
    #[serde(rename = "solo_carpetas_cotu")]
    pub only_cotu: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_folder: String::new(),
            condensed: false,
            only_cotu: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
