//! Filesystem locations and write guards for the CLI.

use std::path::{Path, PathBuf};

use tracing::warn;

use cotu_core::models::config::AppConfig;

/// Directory holding the persisted configuration and report history.
fn data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cotu")
}

/// Path of the configuration file, honoring a `--config` override.
pub fn config_file(override_path: Option<&str>) -> PathBuf {
    match override_path {
        Some(path) => PathBuf::from(path),
        None => data_dir().join("config.json"),
    }
}

/// Path of the report history file.
pub fn history_file() -> PathBuf {
    data_dir().join("historial_reportes.json")
}

/// Load the configuration, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(override_path: Option<&str>) -> AppConfig {
    let path = config_file(override_path);
    if !path.exists() {
        return AppConfig::default();
    }
    match AppConfig::from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("could not load {}: {e}; using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Persist the configuration, creating its directory if needed.
pub fn store_config(config: &AppConfig, override_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file(override_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    config.save(&path)?;
    Ok(())
}

/// Whether `path` is, or sits inside, an operating-system folder where
/// reports must never be written.
pub fn is_system_path(path: &Path) -> bool {
    if !path.is_absolute() {
        return false;
    }

    if cfg!(windows) {
        for var in ["WINDIR", "ProgramFiles", "ProgramFiles(x86)", "ProgramData"] {
            if let Ok(base) = std::env::var(var) {
                if !base.is_empty() && path.starts_with(&base) {
                    return true;
                }
            }
        }
        // Drive roots (C:\, D:\)
        return path.parent().is_none();
    }

    if path == Path::new("/") {
        return true;
    }
    ["/usr", "/etc", "/bin", "/sbin", "/sys", "/proc", "/var"]
        .iter()
        .any(|dir| path.starts_with(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_and_empty_paths_are_not_system() {
        assert!(!is_system_path(Path::new("")));
        assert!(!is_system_path(Path::new("carpeta")));
        assert!(!is_system_path(Path::new("relativo/path")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_system_paths() {
        assert!(is_system_path(Path::new("/")));
        assert!(is_system_path(Path::new("/usr")));
        assert!(is_system_path(Path::new("/usr/bin")));
        assert!(is_system_path(Path::new("/etc")));
        assert!(is_system_path(Path::new("/var/log")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_user_paths_are_allowed() {
        assert!(!is_system_path(Path::new("/home/usuario/FACTURACION")));
        assert!(!is_system_path(Path::new("/tmp/cotu_test")));
        // Prefix match is per component, not per byte
        assert!(!is_system_path(Path::new("/usrdata")));
    }
}
