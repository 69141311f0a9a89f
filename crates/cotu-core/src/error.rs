//! Error types for the cotu-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cotu library.
#[derive(Error, Debug)]
pub enum CotuError {
    /// Folder-tree extraction error.
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while scanning an invoice folder tree.
///
/// Malformed folder names never abort a scan; they degrade to minimal
/// records or a missing inferred date instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The scan root does not exist on the filesystem.
    #[error("la carpeta no existe: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A directory listing failed mid-walk (permissions, vanished share).
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for the cotu library.
pub type Result<T> = std::result::Result<T, CotuError>;
