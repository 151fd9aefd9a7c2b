//! On-disk documentation trees with scripted commit history.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use doc_translations::repository::{Checkout, HistoryLookupError, RepositorySource, SourceError};
use tempfile::TempDir;
use time::OffsetDateTime;

pub const DOCS_ROOT: &str = "docs/source";

/// A checkout in a temp dir that answers history lookups from a table.
pub struct FixtureRepo {
    dir: TempDir,
    history: HashMap<PathBuf, OffsetDateTime>,
    failing: HashSet<PathBuf>,
    lookup_delay: Option<Duration>,
    lookups: AtomicUsize,
}

impl FixtureRepo {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
            history: HashMap::new(),
            failing: HashSet::new(),
            lookup_delay: None,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn location(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Write `docs/source/<language>/<relative>` and record its last change.
    pub fn doc(
        &mut self,
        language: &str,
        relative: &str,
        changed_at: Option<OffsetDateTime>,
    ) -> &mut Self {
        let key = doc_key(language, relative);
        self.write(&key);
        if let Some(changed_at) = changed_at {
            self.history.insert(key, changed_at);
        }
        self
    }

    /// Make history lookups for this document fail.
    pub fn fail_history(&mut self, language: &str, relative: &str) -> &mut Self {
        self.failing.insert(doc_key(language, relative));
        self
    }

    pub fn lookup_delay(&mut self, delay: Duration) -> &mut Self {
        self.lookup_delay = Some(delay);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn write(&self, relative: &Path) {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create doc dir");
        fs::write(path, b"# doc\n").expect("write doc");
    }
}

fn doc_key(language: &str, relative: &str) -> PathBuf {
    Path::new(DOCS_ROOT).join(language).join(relative)
}

impl RepositorySource for FixtureRepo {
    fn materialize(&self, location: &str) -> Result<Checkout, SourceError> {
        let path = PathBuf::from(location);
        if !path.is_dir() {
            return Err(SourceError::NotADirectory(path));
        }
        Ok(Checkout::existing(path))
    }

    fn last_changed_at(
        &self,
        checkout: &Path,
        file: &Path,
    ) -> Result<Option<OffsetDateTime>, HistoryLookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.lookup_delay {
            std::thread::sleep(delay);
        }
        let key = file.strip_prefix(checkout).unwrap_or(file);
        if self.failing.contains(key) {
            return Err(HistoryLookupError::Failed {
                path: file.to_path_buf(),
                status: "exit status: 128".to_string(),
                stderr: "fatal: scripted failure".to_string(),
            });
        }
        Ok(self.history.get(key).copied())
    }
}

/// A source whose repository can never be fetched.
pub struct UnreachableSource;

impl RepositorySource for UnreachableSource {
    fn materialize(&self, location: &str) -> Result<Checkout, SourceError> {
        Err(SourceError::CloneFailed {
            location: location.to_string(),
            status: "exit status: 128".to_string(),
            stderr: "fatal: unable to access".to_string(),
        })
    }

    fn last_changed_at(
        &self,
        _checkout: &Path,
        _file: &Path,
    ) -> Result<Option<OffsetDateTime>, HistoryLookupError> {
        Ok(None)
    }
}
