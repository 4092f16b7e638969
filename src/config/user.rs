use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::schema::TreeRules;
use crate::error::{Result, SproutError};

/// User-level configuration loaded from `~/.config/sprout/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Template tree used when `--template` is not given.
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Replacement prompt defaults, keyed by question name (e.g. `projectName`).
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,

    /// Replacement for the built-in next-steps list.
    #[serde(default)]
    pub next_steps: Option<Vec<String>>,

    /// Path token, template suffix and sentinel name; unset keys keep their defaults.
    #[serde(default)]
    pub rules: TreeRules,
}

/// Get the path to the user config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sprout").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| SproutError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig = toml::from_str(&content).map_err(|e| SproutError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::debug!("loaded user config from {}", path.display());
    Ok(Some(config))
}
