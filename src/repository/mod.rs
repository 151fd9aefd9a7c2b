//! Access to the documentation repository: a local snapshot plus file history.

mod command;
mod errors;
mod git;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use time::OffsetDateTime;
use tracing::warn;

pub use errors::{HistoryLookupError, SourceError};
pub use git::{GitRepository, LocalCheckout};

/// Provider of repository contents and per-file last-change timestamps.
///
/// Implementations are shared across analysis workers and must only read
/// from the checkout.
pub trait RepositorySource: Sync {
    /// Make the repository at `location` available on the local filesystem.
    fn materialize(&self, location: &str) -> Result<Checkout, SourceError>;

    /// Last recorded change of `file` inside `checkout`; `Ok(None)` when the
    /// file has no recorded history.
    fn last_changed_at(
        &self,
        checkout: &Path,
        file: &Path,
    ) -> Result<Option<OffsetDateTime>, HistoryLookupError>;
}

/// A materialized repository. Temporary clones are removed on drop.
#[derive(Debug)]
pub struct Checkout {
    path: PathBuf,
    _workspace: Option<TempDir>,
}

impl Checkout {
    /// A checkout that already existed and is left in place afterwards.
    pub fn existing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _workspace: None,
        }
    }

    /// A checkout living inside `workspace`, deleted together with it.
    pub fn temporary(workspace: TempDir, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _workspace: Some(workspace),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Language directories present under `docs_root`, excluding the source language.
pub fn available_languages(docs_root: &Path, source_language: &str) -> Vec<String> {
    let entries = match fs::read_dir(docs_root) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                dir = %docs_root.display(),
                error = %err,
                "Failed to list language directories"
            );
            return Vec::new();
        }
    };
    let mut languages: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name != source_language && !name.starts_with('.'))
        .collect();
    languages.sort();
    languages
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_language_directories_except_source() {
        let dir = tempdir().unwrap();
        for name in ["en", "ko", "de", ".cache"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("_config.py"), b"").unwrap();
        assert_eq!(available_languages(dir.path(), "en"), vec!["de", "ko"]);
    }

    #[test]
    fn missing_docs_root_has_no_languages() {
        let dir = tempdir().unwrap();
        assert!(available_languages(&dir.path().join("nope"), "en").is_empty());
    }

    #[test]
    fn temporary_checkout_is_removed_on_drop() {
        let workspace = tempfile::tempdir().unwrap();
        let root = workspace.path().to_path_buf();
        let checkout = Checkout::temporary(workspace, root.join("repo"));
        assert_eq!(checkout.path(), root.join("repo"));
        drop(checkout);
        assert!(!root.exists());
    }
}
