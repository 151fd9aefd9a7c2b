use std::path::{Path, PathBuf};

/// Where a source document's translation lives and whether it is there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationMatch {
    pub source_path: PathBuf,
    pub translation_path: PathBuf,
    pub exists: bool,
}

/// Maps documents between language directories under a shared docs root.
///
/// The layout is `<docs_root>/<language>/<relative path>` for every language.
#[derive(Debug, Clone)]
pub struct TranslationMatcher {
    docs_root: PathBuf,
    source_language: String,
}

impl TranslationMatcher {
    pub fn new(docs_root: impl Into<PathBuf>, source_language: impl Into<String>) -> Self {
        Self {
            docs_root: docs_root.into(),
            source_language: source_language.into(),
        }
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn source_root(&self) -> PathBuf {
        self.language_root(&self.source_language)
    }

    pub fn language_root(&self, language: &str) -> PathBuf {
        self.docs_root.join(language)
    }

    /// Expected translation path, computed whether or not a file exists there.
    pub fn translation_path(&self, relative: &Path, target_language: &str) -> PathBuf {
        self.language_root(target_language).join(relative)
    }

    /// Resolve both sides of `relative` and check the translation on disk.
    pub fn locate(&self, relative: &Path, target_language: &str) -> TranslationMatch {
        let translation_path = self.translation_path(relative, target_language);
        let exists = translation_path.is_file();
        TranslationMatch {
            source_path: self.source_root().join(relative),
            translation_path,
            exists,
        }
    }
}
