//! # Logging Module
//!
//! Installs the global `tracing` subscriber. Records emitted through the `log`
//! facade are bridged into the same subscriber.

use crate::config::{AppConfig, LogFormat};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Build the `EnvFilter` for a configuration, falling back to `info`
pub fn build_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging; fails if a global subscriber is already set
pub fn init_logging(config: &AppConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(true);

    match config.log_format {
        LogFormat::Plain => builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?,
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_falls_back() {
        let config = AppConfig {
            log_filter: "nutrition_coach=loud".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            build_filter(&config).to_string(),
            EnvFilter::new("info").to_string()
        );
    }

    #[test]
    fn test_valid_filter_is_kept() {
        let config = AppConfig {
            log_filter: "nutrition_coach=debug".to_string(),
            ..AppConfig::default()
        };
        assert!(build_filter(&config).to_string().contains("nutrition_coach"));
    }
}
