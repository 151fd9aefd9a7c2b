//! Translation status model: per-file documents, freshness rules and the run summary.

mod document;
pub mod freshness;
mod languages;
mod summary;

pub use document::{Document, TranslationStatus};
pub use freshness::{Freshness, classify};
pub use languages::{KNOWN_LANGUAGES, Language, language_name};
pub use summary::{ResultAggregator, Summary, SummaryTotals};
