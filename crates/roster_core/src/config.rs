//! Runtime configuration read from environment variables.
//!
//! | variable           | meaning                         | default               |
//! |--------------------|---------------------------------|-----------------------|
//! | `ROSTER_DB_PATH`   | SQLite database file            | in-memory database    |
//! | `ROSTER_LOG_LEVEL` | one of trace, debug, info, warn, error | `default_log_level()` |
//! | `ROSTER_LOG_DIR`   | absolute directory for log files | logging disabled     |

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level, LoggingError};
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ROSTER_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ROSTER_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ROSTER_LOG_DIR";

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    pub log_dir: Option<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl RosterConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path: read(DB_PATH_VAR).map(PathBuf::from),
            log_level,
            log_dir: read(LOG_DIR_VAR),
        })
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging is active afterwards.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match self.log_dir.as_deref() {
            Some(dir) => init_logging(self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }

    /// Opens the configured database with migrations applied.
    pub fn open_database(&self) -> DbResult<Connection> {
        match self.db_path.as_ref() {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}
