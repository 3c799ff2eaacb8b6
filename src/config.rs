//! # Configuration Module
//!
//! Runtime settings read from the environment, optionally seeded from a
//! `.env` file.

use crate::calculation_engine::BmrFormula;
use crate::nutrition_errors::NutritionError;
use std::path::Path;
use std::str::FromStr;

pub const BMR_FORMULA_VAR: &str = "NUTRITION_BMR_FORMULA";
pub const LOG_FORMAT_VAR: &str = "NUTRITION_LOG_FORMAT";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(NutritionError::Config(format!(
                "{LOG_FORMAT_VAR} must be 'plain' or 'json', got '{other}'"
            ))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Formula used for new plans
    pub bmr_formula: BmrFormula,
    pub log_format: LogFormat,
    /// `EnvFilter` directive, e.g. `info` or `nutrition_coach=debug`
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bmr_formula: BmrFormula::default(),
            log_format: LogFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, NutritionError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings from a dotenv file without touching the process environment
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, NutritionError> {
        let path = path.as_ref();
        let iter = dotenv::from_path_iter(path).map_err(|e| {
            NutritionError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        let mut values = std::collections::HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                NutritionError::Config(format!("malformed line in {}: {e}", path.display()))
            })?;
            values.insert(key, value);
        }

        Self::from_lookup(|key| values.get(key).cloned())
    }

    /// Build a configuration from any key lookup; unset or empty keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NutritionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(BMR_FORMULA_VAR) {
            config.bmr_formula = raw
                .parse()
                .map_err(|e| NutritionError::Config(format!("{BMR_FORMULA_VAR}: {e}")))?;
        }
        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }
        if let Some(raw) = get(LOG_FILTER_VAR) {
            config.log_filter = raw;
        }

        Ok(config)
    }
}
