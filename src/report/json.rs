use std::fs;
use std::path::Path;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::translations::{Summary, SummaryTotals, TranslationStatus};

use super::{ReportError, ensure_parent_dir, source_display, translation_display};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    repository: &'a str,
    target_language: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    generated_at: OffsetDateTime,
    totals: SummaryTotals,
    percentages: Percentages,
    documents: Vec<JsonDocument>,
}

#[derive(Debug, Serialize)]
struct Percentages {
    translated: f64,
    missing: f64,
    outdated: f64,
}

#[derive(Debug, Serialize)]
struct JsonDocument {
    source_file: String,
    translation_file: String,
    translation_exists: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    source_commit_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    translation_commit_date: Option<OffsetDateTime>,
    status: TranslationStatus,
    is_outdated: bool,
}

/// Pretty-printed JSON rendering of `summary`.
pub fn to_json(summary: &Summary, generated_at: OffsetDateTime) -> serde_json::Result<String> {
    let report = JsonReport {
        repository: summary.repository(),
        target_language: summary.target_language(),
        generated_at,
        totals: summary.totals(),
        percentages: Percentages {
            translated: summary.percentage_translated(),
            missing: summary.percentage_missing(),
            outdated: summary.percentage_outdated(),
        },
        documents: summary
            .documents()
            .iter()
            .map(|document| JsonDocument {
                source_file: source_display(document),
                translation_file: translation_display(document),
                translation_exists: document.translation_exists,
                source_commit_date: document.source_changed_at,
                translation_commit_date: document.translation_changed_at,
                status: document.status(),
                is_outdated: document.is_outdated(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

pub fn export_json(
    summary: &Summary,
    path: &Path,
    generated_at: OffsetDateTime,
) -> Result<(), ReportError> {
    ensure_parent_dir(path)?;
    let json = to_json(summary, generated_at).map_err(|source| ReportError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(())
}
