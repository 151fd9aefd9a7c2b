//! The audit run loop: materialize, walk, match, classify, aggregate.

mod errors;
mod runner;

use std::sync::atomic::AtomicBool;

use crate::config::AuditSettings;
use crate::repository::RepositorySource;
use crate::translations::Summary;

pub use errors::AuditError;

/// What to audit: one target language of one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    pub target_language: String,
    /// Remote URL or local path, interpreted by the repository source.
    pub location: String,
}

impl AuditRequest {
    pub fn new(target_language: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            location: location.into(),
        }
    }
}

/// Work completed so far, reported after each directory batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditProgress {
    pub directories_done: usize,
    pub files_done: usize,
}

/// Run a complete audit and return the frozen summary.
pub fn run_audit<S>(
    source: &S,
    settings: &AuditSettings,
    request: &AuditRequest,
) -> Result<Summary, AuditError>
where
    S: RepositorySource + ?Sized,
{
    runner::run(source, settings, request, None, &|_: AuditProgress| {})
}

/// Run an audit that can be canceled and reports progress from worker threads.
pub fn run_audit_with_progress<S>(
    source: &S,
    settings: &AuditSettings,
    request: &AuditRequest,
    cancel: Option<&AtomicBool>,
    on_progress: &(dyn Fn(AuditProgress) + Sync),
) -> Result<Summary, AuditError>
where
    S: RepositorySource + ?Sized,
{
    runner::run(source, settings, request, cancel, on_progress)
}
