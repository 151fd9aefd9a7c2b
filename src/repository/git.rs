use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::config::{AuditSettings, RetrySettings};
use crate::retry::with_retries;

use super::command::{CommandOutput, RunError, run};
use super::errors::{HistoryLookupError, SourceError};
use super::{Checkout, RepositorySource};

const GIT_PROGRAM: &str = "git";
const WORKSPACE_PREFIX: &str = "doc-translations-";

/// Thin wrapper over the `git` executable.
#[derive(Debug, Clone)]
struct GitCli {
    program: PathBuf,
    history_timeout: Option<Duration>,
}

impl GitCli {
    fn new(history_timeout: Option<Duration>) -> Self {
        Self {
            program: PathBuf::from(GIT_PROGRAM),
            history_timeout,
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        // Fail instead of prompting for credentials.
        command.env("GIT_TERMINAL_PROMPT", "0");
        command
    }

    fn clone_into(&self, location: &str, destination: &Path) -> Result<(), SourceError> {
        let mut command = self.command();
        command
            .arg("clone")
            .arg("--quiet")
            .arg("--no-tags")
            .arg(location)
            .arg(destination);
        let output = run(command, None).map_err(|err| match err {
            RunError::Spawn(source) | RunError::Io(source) => SourceError::Spawn {
                location: location.to_string(),
                source,
            },
            RunError::TimedOut => SourceError::CloneFailed {
                location: location.to_string(),
                status: "timed out".to_string(),
                stderr: String::new(),
            },
        })?;
        if output.status.success() {
            return Ok(());
        }
        Err(SourceError::CloneFailed {
            location: location.to_string(),
            status: output.status.to_string(),
            stderr: output.stderr,
        })
    }

    fn last_commit_time(
        &self,
        checkout: &Path,
        file: &Path,
    ) -> Result<Option<OffsetDateTime>, HistoryLookupError> {
        let pathspec = file.strip_prefix(checkout).unwrap_or(file);
        let mut command = self.command();
        command
            .arg("-C")
            .arg(checkout)
            .args(["log", "-1", "--format=%cI", "--"])
            .arg(pathspec);
        let output = run(command, self.history_timeout).map_err(|err| match err {
            RunError::Spawn(source) | RunError::Io(source) => HistoryLookupError::Spawn {
                path: file.to_path_buf(),
                source,
            },
            RunError::TimedOut => HistoryLookupError::TimedOut {
                path: file.to_path_buf(),
                timeout: self.history_timeout.unwrap_or_default(),
            },
        })?;
        parse_log_output(file, output)
    }
}

fn parse_log_output(
    file: &Path,
    output: CommandOutput,
) -> Result<Option<OffsetDateTime>, HistoryLookupError> {
    if !output.status.success() {
        return Err(HistoryLookupError::Failed {
            path: file.to_path_buf(),
            status: output.status.to_string(),
            stderr: output.stderr,
        });
    }
    parse_commit_date(file, &output.stdout)
}

/// Parse the `%cI` (strict ISO 8601) line printed by `git log`.
fn parse_commit_date(file: &Path, raw: &str) -> Result<Option<OffsetDateTime>, HistoryLookupError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    OffsetDateTime::parse(value, &Rfc3339)
        .map(Some)
        .map_err(|source| HistoryLookupError::InvalidTimestamp {
            path: file.to_path_buf(),
            value: value.to_string(),
            source,
        })
}

/// Clones the repository into a fresh temporary directory for each run.
#[derive(Debug, Clone)]
pub struct GitRepository {
    git: GitCli,
    retry: RetrySettings,
}

impl GitRepository {
    pub fn new(history_timeout: Option<Duration>, retry: RetrySettings) -> Self {
        Self {
            git: GitCli::new(history_timeout),
            retry,
        }
    }

    pub fn from_settings(settings: &AuditSettings) -> Self {
        Self::new(settings.history_timeout(), settings.clone_retry)
    }
}

impl RepositorySource for GitRepository {
    fn materialize(&self, location: &str) -> Result<Checkout, SourceError> {
        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|source| SourceError::Workspace {
                location: location.to_string(),
                source,
            })?;
        let destination = workspace.path().join("repo");
        info!(repository = location, "Cloning documentation repository");
        with_retries(&self.retry, location, |attempt| {
            if destination.exists() {
                debug!(attempt, "Removing partial clone before retrying");
                std::fs::remove_dir_all(&destination).map_err(|source| SourceError::Workspace {
                    location: location.to_string(),
                    source,
                })?;
            }
            self.git.clone_into(location, &destination)
        })?;
        debug!(path = %destination.display(), "Clone complete");
        Ok(Checkout::temporary(workspace, destination))
    }

    fn last_changed_at(
        &self,
        checkout: &Path,
        file: &Path,
    ) -> Result<Option<OffsetDateTime>, HistoryLookupError> {
        self.git.last_commit_time(checkout, file)
    }
}

/// Audits an existing working tree in place; nothing is cloned or deleted.
#[derive(Debug, Clone)]
pub struct LocalCheckout {
    git: GitCli,
}

impl LocalCheckout {
    pub fn new(history_timeout: Option<Duration>) -> Self {
        Self {
            git: GitCli::new(history_timeout),
        }
    }

    pub fn from_settings(settings: &AuditSettings) -> Self {
        Self::new(settings.history_timeout())
    }
}

impl RepositorySource for LocalCheckout {
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
        self.git.last_commit_time(checkout, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_strict_iso_commit_dates() {
        let parsed = parse_commit_date(Path::new("a.md"), "2024-01-10T09:15:00+09:00\n").unwrap();
        assert_eq!(parsed, Some(datetime!(2024-01-10 00:15 UTC)));
    }

    #[test]
    fn empty_log_means_no_history() {
        assert_eq!(parse_commit_date(Path::new("a.md"), "\n").unwrap(), None);
    }

    #[test]
    fn garbage_dates_are_lookup_failures() {
        let err = parse_commit_date(Path::new("a.md"), "yesterday").unwrap_err();
        assert!(matches!(err, HistoryLookupError::InvalidTimestamp { .. }));
    }

    #[test]
    fn local_checkout_requires_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalCheckout::new(None);
        let checkout = source
            .materialize(dir.path().to_str().unwrap())
            .unwrap();
        assert_eq!(checkout.path(), dir.path());
        drop(checkout);
        assert!(dir.path().exists());

        let missing = dir.path().join("missing");
        let err = source.materialize(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory(path) if path == missing));
    }
}
