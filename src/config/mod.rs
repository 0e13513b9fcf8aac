//! Configuration system for newsmem.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;
#[cfg(test)]
use tests_utils::ENV_MUTEX;

use crate::errors::Error;
use serde::Deserialize;
use std::path::PathBuf;

pub use loader::ConfigFile;

/// Default retention window for the recent collection, in days.
pub const DEFAULT_RETENTION_DAYS: u32 = 15;
/// Upper bound for `retention_days` (100 years).
pub const MAX_RETENTION_DAYS: u32 = 36_500;
/// Default number of results returned by similarity queries.
pub const DEFAULT_TOP_K: usize = 3;
/// Default sentence-embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database holding both collections.
    #[serde(default)]
    pub database_path: PathBuf,

    /// HuggingFace embedding model identifier.
    #[serde(default)]
    pub embedding_model: String,

    /// Directory for caching ONNX models.
    #[serde(default)]
    pub model_cache: PathBuf,

    /// Days a record stays in the recent collection.
    #[serde(default)]
    pub retention_days: u32,

    /// Number of results returned by queries.
    #[serde(default)]
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        let newsmem_dir = home.join(".newsmem");

        Self {
            database_path: newsmem_dir.join("news.db"),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            model_cache: newsmem_dir.join("models"),
            retention_days: DEFAULT_RETENTION_DAYS,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, and environment overrides.
    pub fn load() -> Result<Self, Error> {
        let file_config = loader::load_from_file()?;

        let mut config = Config::default();

        if let Some(mut file) = file_config {
            paths::expand_tilde(&mut file.database_path);
            paths::expand_tilde(&mut file.model_cache);
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(&mut config)?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if !file.database_path.as_os_str().is_empty() {
            self.database_path = file.database_path;
        }
        if !file.embedding_model.is_empty() {
            self.embedding_model = file.embedding_model;
        }
        if !file.model_cache.as_os_str().is_empty() {
            self.model_cache = file.model_cache;
        }
        self.retention_days = file.retention_days;
        self.top_k = file.top_k;
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            database_path: self.database_path.clone(),
            embedding_model: self.embedding_model.clone(),
            retention_days: self.retention_days,
            top_k: self.top_k,
        };

        validator.validate()
    }

    /// Ensure parent directories for database and cache paths exist.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        if !self.model_cache.as_os_str().is_empty() {
            std::fs::create_dir_all(&self.model_cache).map_err(|e| {
                Error::Config(format!(
                    "Failed to create model cache directory {}: {e}",
                    self.model_cache.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup_env_vars() {
        tests_utils::cleanup_env_vars(&[
            "NEWSMEM_DATABASE_PATH",
            "NEWSMEM_EMBEDDING_MODEL",
            "NEWSMEM_MODEL_CACHE",
            "NEWSMEM_RETENTION_DAYS",
            "NEWSMEM_TOP_K",
        ]);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.database_path.ends_with(".newsmem/news.db"));
        assert_eq!(config.embedding_model, "sentence-transformers/all-MiniLM-L6-v2");
        assert!(config.model_cache.ends_with(".newsmem/models"));
        assert_eq!(config.retention_days, 15);
        assert_eq!(config.top_k, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_from_file_keeps_defaults_for_empty_fields() {
        let mut config = Config::default();
        let file: ConfigFile = toml::from_str("retention_days = 30").unwrap();
        config.merge_from_file(file);

        assert!(config.database_path.ends_with(".newsmem/news.db"));
        assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn test_env_overrides_replace_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        tests_utils::set_env_var("NEWSMEM_RETENTION_DAYS", "7");
        tests_utils::set_env_var("NEWSMEM_TOP_K", "5");

        let mut config = Config::default();
        overrides::apply_env_overrides(&mut config).unwrap();
        cleanup_env_vars();

        assert_eq!(config.retention_days, 7);
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn test_ensure_directories_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            database_path: dir.path().join("nested/db/news.db"),
            model_cache: dir.path().join("cache/models"),
            ..Config::default()
        };

        config.ensure_directories().unwrap();

        assert!(dir.path().join("nested/db").is_dir());
        assert!(dir.path().join("cache/models").is_dir());
    }
}
