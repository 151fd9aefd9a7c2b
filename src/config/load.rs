use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

use super::errors::ConfigError;
use super::types::AuditSettings;

/// Default filename used to store the audit settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(AppDirs::resolve()?.config_file(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AuditSettings, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from an explicit path, returning defaults if the file is missing.
pub fn load_from(path: &Path) -> Result<AuditSettings, ConfigError> {
    if !path.exists() {
        return Ok(AuditSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AuditSettings>(&text)
        .map(AuditSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}
