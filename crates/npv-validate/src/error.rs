//! Error types for run directory validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving validation.
///
/// Layout violations are not errors; the validator reports them as
/// [`ValidationResult`](crate::ValidationResult) values. These variants
/// cover the cases where validation itself cannot proceed.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Batch parent is missing or not a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the JSON run report.
    #[error("failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the JSON run report.
    #[error("failed to encode report: {0}")]
    ReportEncode(#[from] serde_json::Error),
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
