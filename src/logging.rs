//! Tracing setup: readable lines on stderr plus one log file per run.
//!
//! Reports are printed to stdout, so logging never interleaves with them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{AppDirError, AppDirs};

const LOG_FILE_PREFIX: &str = "doc-translations";
const LOG_FILE_EXTENSION: &str = "log";
/// Log files kept after pruning, including the current run's.
const KEEP_LOG_FILES: usize = 10;
const DEFAULT_DIRECTIVE: &str = "info";

const FILE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]-[hour][minute][second]");
const LINE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to build log file name: {0}")]
    FileName(#[from] time::error::Format),
    #[error("A global tracing subscriber is already installed: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Only the first call has an effect.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<(), LoggingError> {
    if FILE_GUARD.get().is_some() {
        return Ok(());
    }
    let dir = AppDirs::resolve()?.logs()?;
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let file_name = log_file_name(OffsetDateTime::now_utc().to_offset(offset))?;
    prune_logs(&dir, KEEP_LOG_FILES.saturating_sub(1))?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, &file_name));
    let timer = fmt::time::OffsetTime::new(offset, LINE_STAMP);
    let subscriber = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)))
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = FILE_GUARD.set(guard);
    tracing::debug!(file = %dir.join(&file_name).display(), "Logging initialized");
    Ok(())
}

/// `doc-translations-YYYYMMDD-HHMMSS.log`; names sort chronologically.
fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!(
        "{LOG_FILE_PREFIX}-{}.{LOG_FILE_EXTENSION}",
        now.format(FILE_STAMP)?
    ))
}

fn is_log_file(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX)
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext == LOG_FILE_EXTENSION)
}

/// Delete the oldest of our log files until at most `keep` remain.
fn prune_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let entries = fs::read_dir(dir).map_err(|source| LoggingError::Io {
        action: "list log directory",
        path: dir.to_path_buf(),
        source,
    })?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_log_file(name))
        .collect();
    if names.len() <= keep {
        return Ok(());
    }
    names.sort();
    let excess = names.len() - keep;
    for name in names.into_iter().take(excess) {
        let path = dir.join(name);
        fs::remove_file(&path).map_err(|source| LoggingError::Io {
            action: "remove old log",
            path,
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use time::macros::datetime;

    #[test]
    fn file_names_sort_by_time() {
        let earlier = log_file_name(datetime!(2023-11-14 22:13:20 UTC)).unwrap();
        let later = log_file_name(datetime!(2024-01-02 03:04:05 UTC)).unwrap();
        assert_eq!(earlier, "doc-translations-20231114-221320.log");
        assert!(earlier < later);
    }

    #[test]
    fn recognizes_only_own_log_files() {
        assert!(is_log_file("doc-translations-20240102-030405.log"));
        assert!(!is_log_file("doc-translations-20240102-030405.txt"));
        assert!(!is_log_file("other-20240102.log"));
    }

    #[test]
    fn prune_keeps_newest_logs() {
        let dir = tempdir().unwrap();
        for day in 1..=12 {
            let name = format!("doc-translations-202401{day:02}-000000.log");
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::write(dir.path().join("notes.log"), b"keep").unwrap();

        prune_logs(dir.path(), 9).unwrap();

        let mut left: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
            .collect();
        left.sort();
        assert_eq!(left.len(), 10);
        assert_eq!(left[0], "doc-translations-20240104-000000.log");
        assert!(left.contains(&"notes.log".to_string()));
    }
}
