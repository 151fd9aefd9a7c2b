//! Classification of a translation against its source by last-change time.

use time::OffsetDateTime;

use super::TranslationStatus;

/// Outcome of comparing a source document with its translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    pub status: TranslationStatus,
    pub is_outdated: bool,
}

impl Freshness {
    const MISSING: Self = Self {
        status: TranslationStatus::Missing,
        is_outdated: false,
    };
    const UP_TO_DATE: Self = Self {
        status: TranslationStatus::UpToDate,
        is_outdated: false,
    };
    const OUTDATED: Self = Self {
        status: TranslationStatus::Outdated,
        is_outdated: true,
    };
}

/// Classify a translation. Total over all inputs.
///
/// Unknown history on either side counts as up to date, and a translation
/// is only outdated when the source changed strictly later.
pub fn classify(
    source_changed_at: Option<OffsetDateTime>,
    translation_changed_at: Option<OffsetDateTime>,
    translation_exists: bool,
) -> Freshness {
    if !translation_exists {
        return Freshness::MISSING;
    }
    match (source_changed_at, translation_changed_at) {
        (Some(source), Some(translation)) if source > translation => Freshness::OUTDATED,
        _ => Freshness::UP_TO_DATE,
    }
}
