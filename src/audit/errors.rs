use std::time::Duration;

use thiserror::Error;

use crate::repository::SourceError;
use crate::scanner::PatternError;

/// Reasons an audit run produced no summary.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid target language {language:?}: {reason}")]
    InvalidLanguage {
        language: String,
        reason: &'static str,
    },
    #[error("Invalid walk pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("Documentation source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    #[error("Audit exceeded the {0:?} run timeout")]
    TimedOut(Duration),
    #[error("Audit canceled")]
    Canceled,
    #[error("An analysis worker panicked")]
    WorkerPanicked,
}
