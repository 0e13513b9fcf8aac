//! Configuration file loading and parsing.

use crate::errors::Error;
use serde::Deserialize;
use std::path::PathBuf;

use super::{DEFAULT_RETENTION_DAYS, DEFAULT_TOP_K};

/// Configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database_path: PathBuf,

    #[serde(default)]
    pub embedding_model: String,

    #[serde(default)]
    pub model_cache: PathBuf,

    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Location of the user config file (`<config dir>/newsmem/config.toml`).
pub fn config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
    config_dir.join("newsmem/config.toml")
}

/// Load configuration from TOML file.
pub fn load_from_file() -> Result<Option<ConfigFile>, Error> {
    let config_path = config_path();

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    Ok(Some(config))
}
