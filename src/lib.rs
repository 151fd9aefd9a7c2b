//! Audit how complete and current the translations of a documentation tree are.
//!
//! A run walks the source-language docs of a repository, pairs each file with
//! its counterpart in the target language, compares last-commit times and
//! collects the results into a [`translations::Summary`].

/// Application directory resolution.
pub mod app_dirs;
/// Audit orchestration and worker pool.
pub mod audit;
/// Command line parsing for the binary.
pub mod cli;
/// Persisted audit settings.
pub mod config;
/// Logging setup.
pub mod logging;
/// Console tables and CSV/JSON exports.
pub mod report;
/// Repository checkouts and commit history.
pub mod repository;
/// Clone retries with exponential backoff.
pub mod retry;
/// Directory traversal and translation path matching.
pub mod scanner;
/// Documents, freshness classification and summaries.
pub mod translations;
