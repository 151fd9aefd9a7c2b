use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use super::Document;

/// Running counters of a summary.
///
/// `analyzed == translated + missing` and `outdated <= translated` hold after
/// every append.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTotals {
    pub analyzed: usize,
    pub translated: usize,
    pub missing: usize,
    pub outdated: usize,
}

impl SummaryTotals {
    fn record(&mut self, document: &Document) {
        self.analyzed += 1;
        if document.translation_exists {
            self.translated += 1;
        } else {
            self.missing += 1;
        }
        if document.is_outdated() {
            self.outdated += 1;
        }
    }
}

/// Translation status of every analyzed file for one language of one repository.
///
/// Produced by [`ResultAggregator::finish`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    target_language: String,
    repository: String,
    totals: SummaryTotals,
    documents: Vec<Document>,
}

impl Summary {
    fn new(target_language: String, repository: String) -> Self {
        Self {
            target_language,
            repository,
            totals: SummaryTotals::default(),
            documents: Vec::new(),
        }
    }

    fn push(&mut self, document: Document) {
        self.totals.record(&document);
        self.documents.push(document);
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Identifier of the audited repository (URL or local path).
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn totals(&self) -> SummaryTotals {
        self.totals
    }

    pub fn files_analyzed(&self) -> usize {
        self.totals.analyzed
    }

    pub fn files_translated(&self) -> usize {
        self.totals.translated
    }

    pub fn files_missing(&self) -> usize {
        self.totals.missing
    }

    pub fn files_outdated(&self) -> usize {
        self.totals.outdated
    }

    pub fn percentage_translated(&self) -> f64 {
        percentage(self.totals.translated, self.totals.analyzed)
    }

    pub fn percentage_missing(&self) -> f64 {
        percentage(self.totals.missing, self.totals.analyzed)
    }

    pub fn percentage_outdated(&self) -> f64 {
        percentage(self.totals.outdated, self.totals.analyzed)
    }

    /// Documents in traversal order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// First `limit` documents without a translation, in insertion order.
    pub fn first_missing(&self, limit: usize) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|document| document.needs_translation())
            .take(limit)
            .collect()
    }

    /// First `limit` documents with an outdated translation, in insertion order.
    pub fn first_outdated(&self, limit: usize) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|document| document.is_outdated())
            .take(limit)
            .collect()
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}

/// Single mutation point for a summary under construction.
///
/// Workers either append documents directly or hand over numbered batches;
/// batches are held back until every lower-numbered batch has arrived, so
/// the final document order follows batch numbering rather than completion
/// order.
#[derive(Debug)]
pub struct ResultAggregator {
    state: Mutex<AggregatorState>,
}

#[derive(Debug)]
struct AggregatorState {
    summary: Summary,
    next_sequence: usize,
    pending: BTreeMap<usize, Vec<Document>>,
}

impl ResultAggregator {
    pub fn new(target_language: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(AggregatorState {
                summary: Summary::new(target_language.into(), repository.into()),
                next_sequence: 0,
                pending: BTreeMap::new(),
            }),
        }
    }

    /// Append one document immediately.
    pub fn append(&self, document: Document) {
        self.lock().summary.push(document);
    }

    /// Append the documents of batch `sequence` once batches `0..sequence` are in.
    pub fn append_batch(&self, sequence: usize, documents: Vec<Document>) {
        let mut state = self.lock();
        state.pending.insert(sequence, documents);
        loop {
            let next = state.next_sequence;
            let Some(ready) = state.pending.remove(&next) else {
                break;
            };
            for document in ready {
                state.summary.push(document);
            }
            state.next_sequence += 1;
        }
    }

    /// Counters as of now.
    pub fn totals(&self) -> SummaryTotals {
        self.lock().summary.totals
    }

    /// Freeze the summary. Batches still waiting on a gap are flushed in order.
    pub fn finish(self) -> Summary {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(|err| err.into_inner());
        let mut summary = state.summary;
        for (_, documents) in state.pending {
            for document in documents {
                summary.push(document);
            }
        }
        summary
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}
