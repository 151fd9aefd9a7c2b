//! Discovery of source documents and their expected translations.

mod matcher;
mod pattern;
mod walk;

pub use matcher::{TranslationMatch, TranslationMatcher};
pub use pattern::{GlobPattern, PatternError, PatternSet};
pub use walk::{DirectoryBatch, DirectoryWalker, Directories, WalkRules};
