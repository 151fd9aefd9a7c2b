use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use time::OffsetDateTime;

use super::freshness::{Freshness, classify};

/// Translation state of one source document.
///
/// Variants are declared in ascending precedence so `Ord` ranks
/// `Missing > Outdated > UpToDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TranslationStatus {
    #[serde(rename = "Up-to-date")]
    UpToDate,
    Outdated,
    Missing,
}

impl TranslationStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::UpToDate => "Up-to-date",
            Self::Outdated => "Outdated",
            Self::Missing => "Missing",
        }
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One source file and what is known about its translation.
///
/// Status and staleness are derived on demand from the stored facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source_language: String,
    pub target_language: String,
    /// Path below the source-language root, shared by source and translation.
    pub relative_path: PathBuf,
    pub source_path: PathBuf,
    pub translation_path: PathBuf,
    pub source_changed_at: Option<OffsetDateTime>,
    pub translation_changed_at: Option<OffsetDateTime>,
    pub translation_exists: bool,
}

impl Document {
    pub fn freshness(&self) -> Freshness {
        classify(
            self.source_changed_at,
            self.translation_changed_at,
            self.translation_exists,
        )
    }

    pub fn status(&self) -> TranslationStatus {
        self.freshness().status
    }

    /// True when the source changed after the translation was last touched.
    pub fn is_outdated(&self) -> bool {
        self.freshness().is_outdated
    }

    pub fn needs_translation(&self) -> bool {
        !self.translation_exists
    }

    /// File name of the source document, for compact report rows.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn document(
        exists: bool,
        source: Option<OffsetDateTime>,
        translation: Option<OffsetDateTime>,
    ) -> Document {
        Document {
            source_language: "en".into(),
            target_language: "fr".into(),
            relative_path: PathBuf::from("guide/intro.md"),
            source_path: PathBuf::from("/repo/docs/source/en/guide/intro.md"),
            translation_path: PathBuf::from("/repo/docs/source/fr/guide/intro.md"),
            source_changed_at: source,
            translation_changed_at: translation,
            translation_exists: exists,
        }
    }

    #[test]
    fn missing_translation_is_never_outdated() {
        let doc = document(
            false,
            Some(datetime!(2024-01-10 0:00 UTC)),
            Some(datetime!(2024-01-05 0:00 UTC)),
        );
        assert_eq!(doc.status(), TranslationStatus::Missing);
        assert!(!doc.is_outdated());
        assert!(doc.needs_translation());
    }

    #[test]
    fn older_translation_is_outdated() {
        let doc = document(
            true,
            Some(datetime!(2024-01-10 0:00 UTC)),
            Some(datetime!(2024-01-05 0:00 UTC)),
        );
        assert_eq!(doc.status(), TranslationStatus::Outdated);
        assert!(doc.is_outdated());
        assert!(!doc.needs_translation());
    }

    #[test]
    fn status_precedence_orders_missing_first() {
        assert!(TranslationStatus::Missing > TranslationStatus::Outdated);
        assert!(TranslationStatus::Outdated > TranslationStatus::UpToDate);
        assert_eq!(TranslationStatus::UpToDate.to_string(), "Up-to-date");
    }

    #[test]
    fn file_name_uses_last_component() {
        assert_eq!(document(true, None, None).file_name(), "intro.md");
    }
}
