use std::path::PathBuf;

pub(super) const MAX_WORKER_COUNT: u32 = 64;

pub(super) fn clamp_worker_count(value: u32) -> u32 {
    value.min(MAX_WORKER_COUNT)
}

pub(super) fn default_repository_url() -> String {
    "https://github.com/huggingface/transformers.git".to_string()
}

pub(super) fn default_docs_root() -> PathBuf {
    PathBuf::from("docs").join("source")
}

pub(super) fn default_source_language() -> String {
    "en".to_string()
}

pub(super) fn default_extensions() -> Vec<String> {
    to_strings(&["md", "mdx", "rst"])
}

pub(super) fn default_skip_directories() -> Vec<String> {
    to_strings(&["img", "images", "_static", "js", "css"])
}

pub(super) fn default_restricted_patterns() -> Vec<String> {
    to_strings(&[
        "*.png",
        "*.jpg",
        "*.jpeg",
        "*.gif",
        "*.svg",
        "_toctree.yml",
        "*/_toctree.yml",
        "README.md",
        "*/README.md",
    ])
}

pub(super) fn default_history_timeout_secs() -> u64 {
    30
}

pub(super) fn default_report_limit() -> usize {
    10
}

pub(super) fn default_retry_attempts() -> u32 {
    3
}

pub(super) fn default_retry_base_delay_ms() -> u64 {
    500
}

pub(super) fn default_retry_max_delay_ms() -> u64 {
    5_000
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
