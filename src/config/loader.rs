//! Configuration file discovery and loading.
//!
//! The project config lives at `.packtrain.yml` in the project root, with
//! `packtrain.yml` accepted as a fallback. A missing file is not an error
//! — the builtin catalog alone is a complete configuration. An explicitly
//! requested path that does not exist is.

use crate::config::schema::PacktrainConfig;
use crate::error::{PacktrainError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names probed in the project root, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &[".packtrain.yml", "packtrain.yml"];

/// Find the project config file, if any.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.exists())
}

/// Load the project config from the project root.
///
/// Returns `Ok(None)` when no config file exists.
pub fn load_config(project_root: &Path) -> Result<Option<PacktrainConfig>> {
    match find_config(project_root) {
        Some(path) => load_config_file(&path).map(Some),
        None => Ok(None),
    }
}

/// Load and validate a config file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<PacktrainConfig> {
    if !path.exists() {
        return Err(PacktrainError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config: PacktrainConfig =
        serde_yaml::from_str(&content).map_err(|e| PacktrainError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    config.validate()?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}
