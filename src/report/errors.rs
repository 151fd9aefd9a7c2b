use std::path::PathBuf;

use thiserror::Error;

/// Errors while writing report files.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode report {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}
