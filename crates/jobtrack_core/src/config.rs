//! Environment-driven core configuration.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level for embedders.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - Resolution never fails; validation happens where values are used.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "JOBTRACK_DB_PATH";
pub const LOG_DIR_ENV: &str = "JOBTRACK_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "JOBTRACK_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "jobtrack.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "jobtrack-logs";

/// Resolved settings shared by FFI and CLI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let base = std::env::temp_dir();
        Self {
            db_path: base.join(DEFAULT_DB_FILE_NAME),
            log_dir: base.join(DEFAULT_LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_dir: non_blank(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
        }
    }

    /// Returns a copy with the database path replaced.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}
