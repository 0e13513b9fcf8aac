//! Configuration validation logic.

use crate::collection::MAX_SEARCH_LIMIT;

use super::MAX_RETENTION_DAYS;
use crate::errors::Error;
use std::path::PathBuf;

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// HuggingFace embedding model identifier.
    pub embedding_model: String,
    /// Retention window of the recent collection, in days.
    pub retention_days: u32,
    /// Default query result count.
    pub top_k: usize,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Retention window is between 1 and `MAX_RETENTION_DAYS` days
    /// - Result count is between 1 and `MAX_SEARCH_LIMIT`
    /// - Embedding model is not empty
    /// - Database path is not empty
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_retention_days()?;
        self.validate_top_k()?;
        self.validate_embedding_model()?;
        self.validate_database_path()?;

        Ok(())
    }

    fn validate_retention_days(&self) -> Result<(), Error> {
        if self.retention_days == 0 || self.retention_days > MAX_RETENTION_DAYS {
            return Err(Error::Config(format!(
                "Invalid retention window: {} days (must be between 1 and {})",
                self.retention_days, MAX_RETENTION_DAYS
            )));
        }

        Ok(())
    }

    fn validate_top_k(&self) -> Result<(), Error> {
        if self.top_k == 0 || self.top_k > MAX_SEARCH_LIMIT {
            return Err(Error::Config(format!(
                "Invalid top_k: {} (must be between 1 and {})",
                self.top_k, MAX_SEARCH_LIMIT
            )));
        }

        Ok(())
    }

    fn validate_embedding_model(&self) -> Result<(), Error> {
        if self.embedding_model.trim().is_empty() {
            return Err(Error::Config("Embedding model cannot be empty".to_string()));
        }

        Ok(())
    }

    fn validate_database_path(&self) -> Result<(), Error> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ConfigValidator {
        ConfigValidator {
            database_path: PathBuf::from("/test/news.db"),
            embedding_model: "test/model".to_string(),
            retention_days: 15,
            top_k: 3,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validator().validate().is_ok());
    }

    #[test]
    fn test_zero_retention_rejected() {
        let v = ConfigValidator {
            retention_days: 0,
            ..validator()
        };
        assert!(matches!(v.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_retention_upper_bound() {
        let mut v = validator();
        v.retention_days = MAX_RETENTION_DAYS;
        assert!(v.validate().is_ok());

        v.retention_days = MAX_RETENTION_DAYS + 1;
        assert!(matches!(v.validate(), Err(Error::Config(_))));

        v.retention_days = u32::MAX;
        assert!(matches!(v.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_top_k_bounds() {
        let mut v = validator();
        v.top_k = 0;
        assert!(matches!(v.validate(), Err(Error::Config(_))));

        v.top_k = MAX_SEARCH_LIMIT + 1;
        assert!(matches!(v.validate(), Err(Error::Config(_))));

        v.top_k = 1;
        assert!(v.validate().is_ok());

        v.top_k = MAX_SEARCH_LIMIT;
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_empty_model_rejected() {
        let v = ConfigValidator {
            embedding_model: "  ".to_string(),
            ..validator()
        };
        assert!(matches!(v.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let v = ConfigValidator {
            database_path: PathBuf::new(),
            ..validator()
        };
        assert!(matches!(v.validate(), Err(Error::Config(_))));
    }
}
