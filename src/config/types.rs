use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Everything an audit run needs to know besides the target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Repository audited when no `--repo`/`--checkout` is given.
    #[serde(default = "default_repository_url")]
    pub repository_url: String,
    /// Directory inside the repository that holds one folder per language.
    #[serde(default = "default_docs_root")]
    pub docs_root: PathBuf,
    /// Reference language every other language is compared against.
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// File extensions (without the dot) treated as documentation.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory-name globs whose subtrees are never walked.
    #[serde(default = "default_skip_directories")]
    pub skip_directories: Vec<String>,
    /// Globs, relative to the source-language root, for files that are never translated.
    #[serde(default = "default_restricted_patterns")]
    pub restricted_patterns: Vec<String>,
    /// Worker threads for file analysis; `0` picks the available parallelism.
    #[serde(default)]
    pub worker_count: u32,
    /// Per-file history lookup timeout; `0` disables it.
    #[serde(default = "default_history_timeout_secs")]
    pub history_timeout_secs: u64,
    /// Whole-run timeout; `0` disables it.
    #[serde(default)]
    pub run_timeout_secs: u64,
    /// Rows shown in each top-N report table.
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,
    #[serde(default)]
    pub clone_retry: RetrySettings,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            repository_url: default_repository_url(),
            docs_root: default_docs_root(),
            source_language: default_source_language(),
            extensions: default_extensions(),
            skip_directories: default_skip_directories(),
            restricted_patterns: default_restricted_patterns(),
            worker_count: 0,
            history_timeout_secs: default_history_timeout_secs(),
            run_timeout_secs: 0,
            report_limit: default_report_limit(),
            clone_retry: RetrySettings::default(),
        }
    }
}

impl AuditSettings {
    /// Clean up values coming from hand-edited config files.
    pub fn normalized(mut self) -> Self {
        self.worker_count = clamp_worker_count(self.worker_count);
        self.source_language = self.source_language.trim().to_string();
        if self.source_language.is_empty() {
            self.source_language = default_source_language();
        }
        self.extensions = self
            .extensions
            .into_iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        if self.extensions.is_empty() {
            self.extensions = default_extensions();
        }
        self.clone_retry.max_attempts = self.clone_retry.max_attempts.max(1);
        self
    }

    /// Number of analysis workers to spawn for this run.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(MAX_WORKER_COUNT as usize),
            count => clamp_worker_count(count) as usize,
        }
    }

    pub fn history_timeout(&self) -> Option<Duration> {
        (self.history_timeout_secs > 0).then(|| Duration::from_secs(self.history_timeout_secs))
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        (self.run_timeout_secs > 0).then(|| Duration::from_secs(self.run_timeout_secs))
    }
}

/// Backoff used when cloning the documentation repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_retry_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_retry_attempts(),
            base_delay_ms: default_retry_base_delay_ms(),
            max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}
