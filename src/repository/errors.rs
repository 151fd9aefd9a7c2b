use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::retry::Transient;

/// The repository could not be made available locally.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to prepare a workspace for {location}: {source}")]
    Workspace {
        location: String,
        source: std::io::Error,
    },
    #[error("Failed to run git for {location}: {source}")]
    Spawn {
        location: String,
        source: std::io::Error,
    },
    #[error("git clone of {location} failed ({status}): {stderr}")]
    CloneFailed {
        location: String,
        status: String,
        stderr: String,
    },
    #[error("Checkout path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Only a clone that git itself rejected is worth repeating.
impl Transient for SourceError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::CloneFailed { .. })
    }
}

/// History for a single file could not be determined.
///
/// The audit treats this as "no timestamp" and carries on.
#[derive(Debug, Error)]
pub enum HistoryLookupError {
    #[error("Failed to run git log for {path}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("git log for {path} failed ({status}): {stderr}")]
    Failed {
        path: PathBuf,
        status: String,
        stderr: String,
    },
    #[error("git log for {path} timed out after {timeout:?}")]
    TimedOut { path: PathBuf, timeout: Duration },
    #[error("Unparseable commit date {value:?} for {path}: {source}")]
    InvalidTimestamp {
        path: PathBuf,
        value: String,
        source: time::error::Parse,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_clone_failures_are_transient() {
        let clone = SourceError::CloneFailed {
            location: "https://example.invalid/repo.git".into(),
            status: "exit status: 128".into(),
            stderr: "Could not resolve host".into(),
        };
        assert!(clone.is_transient());
        let spawn = SourceError::Spawn {
            location: "repo".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "git not found"),
        };
        assert!(!spawn.is_transient());
        assert!(!SourceError::NotADirectory(PathBuf::from("/nope")).is_transient());
    }
}
