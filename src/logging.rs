//! Logging setup for the newsmem binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or to embedding applications).

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use crate::errors::Error;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "NEWSMEM_LOG";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: Level,
    /// Whether to use ANSI colors
    pub use_colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_colors: std::io::stderr().is_terminal(),
        }
    }
}

impl LoggingConfig {
    /// Create config from `NEWSMEM_LOG`, raising the level to debug when `verbose`.
    pub fn from_env(verbose: bool) -> Self {
        let mut config = Self::default();

        if let Ok(level_str) = std::env::var(LOG_LEVEL_ENV) {
            if let Some(level) = parse_level(&level_str) {
                config.level = level;
            }
        }

        if verbose && config.level < Level::DEBUG {
            config.level = Level::DEBUG;
        }

        config
    }
}

/// Parse a level name; unknown names yield `None`.
pub fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Install a stderr fmt subscriber for the given configuration.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Error> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.use_colors)
        .with_target(false)
        .with_filter(LevelFilter::from_level(config.level));

    Registry::default()
        .with(layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(level = ?config.level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("error"), Some(Level::ERROR));
        assert_eq!(parse_level(" WARN "), Some(Level::WARN));
        assert_eq!(parse_level("Debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(LoggingConfig::default().level, Level::WARN);
    }
}
