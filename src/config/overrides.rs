//! Environment variable overrides for configuration.

use crate::errors::Error;

use super::env_parser;
use super::Config;

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), Error> {
    env_parser::apply_database_path_override(&mut config.database_path)?;
    env_parser::apply_embedding_model_override(&mut config.embedding_model)?;
    env_parser::apply_model_cache_override(&mut config.model_cache)?;
    env_parser::apply_retention_days_override(&mut config.retention_days)?;
    env_parser::apply_top_k_override(&mut config.top_k)?;
    Ok(())
}
