//! Audit settings persisted as TOML under the app directory.

mod defaults;
mod errors;
mod load;
mod save;
mod types;

pub use errors::ConfigError;
pub use load::{CONFIG_FILE_NAME, config_path, load_from, load_or_default};
pub use save::save_to_path;
pub use types::{AuditSettings, RetrySettings};

/// Documentation repositories that commonly carry translated docs.
pub const KNOWN_REPOSITORIES: &[&str] = &[
    "https://github.com/huggingface/transformers.git",
    "https://github.com/huggingface/diffusers.git",
    "https://github.com/huggingface/datasets.git",
    "https://github.com/huggingface/accelerate.git",
    "https://github.com/huggingface/peft.git",
];
