//! Error types for package content operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading packages or extracting their contents.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// File I/O failure; aborts the remaining extraction entries.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest stream that does not decode.
    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    /// Package directory that does not exist.
    #[error("package directory '{0}' does not exist")]
    MissingPackage(PathBuf),

    /// Content-entry path that would land outside the target directory.
    #[error("entry path '{0}' escapes the target directory")]
    UnsafeEntryPath(PathBuf),
}

/// Convenience alias for results with [`ArchiveError`].
pub type Result<T> = std::result::Result<T, ArchiveError>;
