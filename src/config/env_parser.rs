//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;

pub const DATABASE_PATH: &str = "NEWSMEM_DATABASE_PATH";
pub const EMBEDDING_MODEL: &str = "NEWSMEM_EMBEDDING_MODEL";
pub const MODEL_CACHE: &str = "NEWSMEM_MODEL_CACHE";
pub const RETENTION_DAYS: &str = "NEWSMEM_RETENTION_DAYS";
pub const TOP_K: &str = "NEWSMEM_TOP_K";

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.to_string())
}

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    let value = parse_env_string(name, value)?;
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable as a number. Range checks happen in validation.
fn parse_env_number<T>(name: &str, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = parse_env_string(name, value)?;
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

fn read(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Apply NEWSMEM_DATABASE_PATH environment variable override.
pub fn apply_database_path_override(database_path: &mut PathBuf) -> Result<(), Error> {
    if let Some(val) = read(DATABASE_PATH) {
        *database_path = parse_env_path(DATABASE_PATH, &val)?;
    }
    Ok(())
}

/// Apply NEWSMEM_EMBEDDING_MODEL environment variable override.
pub fn apply_embedding_model_override(embedding_model: &mut String) -> Result<(), Error> {
    if let Some(val) = read(EMBEDDING_MODEL) {
        *embedding_model = parse_env_string(EMBEDDING_MODEL, &val)?;
    }
    Ok(())
}

/// Apply NEWSMEM_MODEL_CACHE environment variable override.
pub fn apply_model_cache_override(model_cache: &mut PathBuf) -> Result<(), Error> {
    if let Some(val) = read(MODEL_CACHE) {
        *model_cache = parse_env_path(MODEL_CACHE, &val)?;
    }
    Ok(())
}

/// Apply NEWSMEM_RETENTION_DAYS environment variable override.
pub fn apply_retention_days_override(retention_days: &mut u32) -> Result<(), Error> {
    if let Some(val) = read(RETENTION_DAYS) {
        *retention_days = parse_env_number(RETENTION_DAYS, &val)?;
    }
    Ok(())
}

/// Apply NEWSMEM_TOP_K environment variable override.
pub fn apply_top_k_override(top_k: &mut usize) -> Result<(), Error> {
    if let Some(val) = read(TOP_K) {
        *top_k = parse_env_number(TOP_K, &val)?;
    }
    Ok(())
}
