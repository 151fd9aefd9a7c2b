//! Where the tool keeps its config file and logs.
//!
//! Everything lives in one `.doc-translations` folder under the OS config
//! directory, or under `$DOC_TRANSLATIONS_CONFIG_HOME` when that is set.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

pub const APP_DIR_NAME: &str = ".doc-translations";
pub const CONFIG_HOME_ENV: &str = "DOC_TRANSLATIONS_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory could be determined; set {CONFIG_HOME_ENV}")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved application directory. Subdirectories are created on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Locate the app directory from the environment, creating it if needed.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = match std::env::var_os(CONFIG_HOME_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => BaseDirs::new()
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or(AppDirError::NoBaseDir)?,
        };
        Self::under(&base)
    }

    /// Use `<base>/.doc-translations`, creating it if needed.
    pub fn under(base: &Path) -> Result<Self, AppDirError> {
        let root = ensure_dir(base.join(APP_DIR_NAME))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn logs(&self) -> Result<PathBuf, AppDirError> {
        ensure_dir(self.root.join(LOGS_DIR_NAME))
    }
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}
