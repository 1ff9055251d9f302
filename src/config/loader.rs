use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::request::{DEFAULT_API_KEY_HEADER, DEFAULT_TIMEOUT_SECS};

pub const CONFIG_FILE: &str = "config.json";
pub const DATA_DIR_ENV: &str = "RESTCLI_HOME";
pub const DEFAULT_DATA_DIR: &str = ".restcli";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RestConfig {
    pub default_timeout: u64,
    pub api_key_header: String,
    pub strict: bool,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT_SECS,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            strict: false,
        }
    }
}

/// Reads `config.json` from the data directory. A missing file means defaults;
/// a malformed one is an error.
pub fn load_config(data_dir: &Path) -> Result<RestConfig> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(RestConfig::default());
    }

    let contents =
        fs::read_to_string(&path).with_context(|| format!("reading config {}", path.display()))?;
    let config: RestConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", path.display()))?;

    if config.default_timeout == 0 {
        return Err(anyhow!(
            "invalid config {}: defaultTimeout must be at least 1",
            path.display()
        ));
    }
    Ok(config)
}

/// Picks the data directory: an explicit path (already merged with
/// `RESTCLI_HOME` by the caller) or `~/.restcli`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_absolute() => Ok(path.to_path_buf()),
        Some(path) => Ok(std::env::current_dir()?.join(path)),
        None => dirs::home_dir()
            .map(|home| home.join(DEFAULT_DATA_DIR))
            .ok_or_else(|| anyhow!("could not determine home directory; set {DATA_DIR_ENV}")),
    }
}
