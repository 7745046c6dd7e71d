//! Process configuration for catalog bootstrap.
//!
//! # Responsibility
//! - Collect log and database settings from the environment.
//!
//! # Invariants
//! - Missing variables fall back to defaults; `from_env` never fails.
//! - An empty `PINBOARD_DB` means "no database".

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "PINBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PINBOARD_LOG_DIR";
pub const ENV_DATABASE: &str = "PINBOARD_DB";

const DEFAULT_LOG_DIR_NAME: &str = "pinboard-logs";

/// Bootstrap settings for the catalog process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub log_level: String,
    pub log_dir: PathBuf,
    /// Legacy catalog database to hydrate from at startup.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
            database_path: None,
        }
    }
}

impl CatalogConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            log_level: non_empty(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: non_empty(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            database_path: non_empty(ENV_DATABASE).map(PathBuf::from),
        }
    }
}
