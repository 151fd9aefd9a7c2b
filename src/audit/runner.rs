use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, sync_channel};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::AuditSettings;
use crate::repository::RepositorySource;
use crate::scanner::{DirectoryBatch, DirectoryWalker, TranslationMatcher, WalkRules};
use crate::translations::{Document, ResultAggregator, Summary};

use super::{AuditError, AuditProgress, AuditRequest};

/// Batches queued ahead of the workers, per worker.
const QUEUE_DEPTH_PER_WORKER: usize = 2;

type BatchQueue = Arc<Mutex<Receiver<(usize, DirectoryBatch)>>>;

pub(super) fn run<S>(
    source: &S,
    settings: &AuditSettings,
    request: &AuditRequest,
    cancel: Option<&AtomicBool>,
    on_progress: &(dyn Fn(AuditProgress) + Sync),
) -> Result<Summary, AuditError>
where
    S: RepositorySource + ?Sized,
{
    let started = Instant::now();
    let target_language = request.target_language.trim();
    validate_language(target_language, &settings.source_language)?;
    let rules = WalkRules::from_settings(settings)?;
    let aggregator = ResultAggregator::new(target_language, request.location.clone());

    info!(
        repository = %request.location,
        language = target_language,
        "Starting translation audit"
    );
    let checkout = source.materialize(&request.location)?;
    let matcher = TranslationMatcher::new(
        checkout.path().join(&settings.docs_root),
        settings.source_language.clone(),
    );
    let source_root = matcher.source_root();
    if !source_root.is_dir() {
        warn!(
            root = %source_root.display(),
            "Source documentation root not found; reporting an empty audit"
        );
        return Ok(aggregator.finish());
    }

    let run = RunContext {
        source,
        checkout: checkout.path(),
        matcher: &matcher,
        target_language,
        aggregator: &aggregator,
        guard: StopGuard::new(cancel, settings.run_timeout(), started),
        directories_done: AtomicUsize::new(0),
        files_done: AtomicUsize::new(0),
        on_progress,
    };
    let walker = DirectoryWalker::new(source_root, rules);
    let worker_count = settings.resolved_worker_count();
    let panicked = analyze_tree(&run, &walker, worker_count);

    if let Some(err) = run.guard.stop_reason() {
        warn!(error = %err, "Translation audit stopped early");
        return Err(err);
    }
    if panicked {
        return Err(AuditError::WorkerPanicked);
    }
    let summary = aggregator.finish();
    info!(
        analyzed = summary.files_analyzed(),
        translated = summary.files_translated(),
        missing = summary.files_missing(),
        outdated = summary.files_outdated(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Translation audit finished"
    );
    Ok(summary)
}

fn validate_language(language: &str, source_language: &str) -> Result<(), AuditError> {
    let reason = if language.is_empty() {
        "language code is empty"
    } else if language.contains(['/', '\\']) || language == "." || language == ".." {
        "language code must be a single directory name"
    } else if language == source_language {
        "target language is the source language"
    } else {
        return Ok(());
    };
    Err(AuditError::InvalidLanguage {
        language: language.to_string(),
        reason,
    })
}

/// Feed directory batches to a fixed pool of workers; returns whether any worker panicked.
fn analyze_tree<S>(run: &RunContext<'_, S>, walker: &DirectoryWalker, worker_count: usize) -> bool
where
    S: RepositorySource + ?Sized,
{
    let worker_count = worker_count.max(1);
    let (tx, rx) = sync_channel::<(usize, DirectoryBatch)>(worker_count * QUEUE_DEPTH_PER_WORKER);
    let queue: BatchQueue = Arc::new(Mutex::new(rx));
    debug!(workers = worker_count, root = %walker.root().display(), "Spawning analysis workers");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..worker_count)
            .map(|_| {
                let queue = Arc::clone(&queue);
                scope.spawn(move || worker_loop(run, &queue))
            })
            .collect();
        // Workers own the receiver; once they are all gone, sends fail.
        drop(queue);

        for (sequence, batch) in walker.directories().enumerate() {
            if run.guard.should_stop() {
                break;
            }
            if tx.send((sequence, batch)).is_err() {
                break;
            }
        }
        drop(tx);

        let mut panicked = false;
        for handle in handles {
            if handle.join().is_err() {
                panicked = true;
            }
        }
        panicked
    })
}

fn worker_loop<S>(run: &RunContext<'_, S>, queue: &BatchQueue)
where
    S: RepositorySource + ?Sized,
{
    loop {
        if run.guard.should_stop() {
            return;
        }
        let next = {
            let guard = match queue.lock() {
                Ok(guard) => guard,
                Err(_) => return,
            };
            guard.recv()
        };
        let Ok((sequence, batch)) = next else {
            return;
        };
        let mut documents = Vec::with_capacity(batch.files.len());
        for relative in &batch.files {
            if run.guard.should_stop() {
                return;
            }
            documents.push(run.analyze_file(relative));
        }
        let file_count = documents.len();
        run.aggregator.append_batch(sequence, documents);
        run.report_progress(file_count);
    }
}

struct RunContext<'a, S: ?Sized> {
    source: &'a S,
    checkout: &'a Path,
    matcher: &'a TranslationMatcher,
    target_language: &'a str,
    aggregator: &'a ResultAggregator,
    guard: StopGuard<'a>,
    directories_done: AtomicUsize,
    files_done: AtomicUsize,
    on_progress: &'a (dyn Fn(AuditProgress) + Sync),
}

impl<S> RunContext<'_, S>
where
    S: RepositorySource + ?Sized,
{
    fn analyze_file(&self, relative: &Path) -> Document {
        let found = self.matcher.locate(relative, self.target_language);
        let source_changed_at = self.last_changed_at(&found.source_path);
        let translation_changed_at = if found.exists {
            self.last_changed_at(&found.translation_path)
        } else {
            None
        };
        Document {
            source_language: self.matcher.source_language().to_string(),
            target_language: self.target_language.to_string(),
            relative_path: relative.to_path_buf(),
            source_path: found.source_path,
            translation_path: found.translation_path,
            source_changed_at,
            translation_changed_at,
            translation_exists: found.exists,
        }
    }

    /// Lookup failures are logged and read as an unknown timestamp.
    fn last_changed_at(&self, file: &Path) -> Option<OffsetDateTime> {
        match self.source.last_changed_at(self.checkout, file) {
            Ok(changed_at) => changed_at,
            Err(err) => {
                warn!(path = %file.display(), error = %err, "History lookup failed");
                None
            }
        }
    }

    fn report_progress(&self, file_count: usize) {
        let directories_done = self.directories_done.fetch_add(1, Ordering::Relaxed) + 1;
        let files_done = self.files_done.fetch_add(file_count, Ordering::Relaxed) + file_count;
        (self.on_progress)(AuditProgress {
            directories_done,
            files_done,
        });
    }
}

/// Cooperative stop signal shared by the coordinator and workers.
struct StopGuard<'a> {
    cancel: Option<&'a AtomicBool>,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    timed_out: AtomicBool,
}

impl<'a> StopGuard<'a> {
    fn new(cancel: Option<&'a AtomicBool>, timeout: Option<Duration>, started: Instant) -> Self {
        Self {
            cancel,
            timeout,
            deadline: timeout.map(|timeout| started + timeout),
            timed_out: AtomicBool::new(false),
        }
    }

    fn canceled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn should_stop(&self) -> bool {
        if self.canceled() || self.timed_out.load(Ordering::Relaxed) {
            return true;
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            self.timed_out.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    fn stop_reason(&self) -> Option<AuditError> {
        if self.canceled() {
            return Some(AuditError::Canceled);
        }
        if self.timed_out.load(Ordering::Relaxed) {
            return Some(AuditError::TimedOut(self.timeout.unwrap_or_default()));
        }
        None
    }
}
