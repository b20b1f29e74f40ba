//! Runtime configuration loaded from the environment.
//!
//! | Env Var             | Default                                   |
//! |---------------------|-------------------------------------------|
//! | `CRITTER_DB_PATH`   | `critter.sqlite3`                         |
//! | `CRITTER_LOG_LEVEL` | `debug` (debug builds) / `info` (release) |
//! | `CRITTER_LOG_DIR`   | unset: file logging stays disabled        |

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::path::PathBuf;
use thiserror::Error;

pub const DB_PATH_VAR: &str = "CRITTER_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CRITTER_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CRITTER_LOG_DIR";

const DEFAULT_DB_PATH: &str = "critter.sqlite3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("invalid CRITTER_LOG_LEVEL: {0}")]
    LogLevel(#[from] LoggingError),
    #[error("failed to load .env file")]
    EnvFile(#[source] dotenvy::Error),
}

/// Settings needed to open storage and start logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Loads `.env` when present, then reads the process environment.
    ///
    /// A missing `.env` is ignored; an unreadable or malformed one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        accept_env_file(dotenvy::dotenv().map(|_| ()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = match lookup(DB_PATH_VAR) {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::Blank(DB_PATH_VAR)),
            Some(value) => PathBuf::from(value.trim()),
            None => PathBuf::from(DEFAULT_DB_PATH),
        };

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value)?,
            None => default_log_level(),
        };

        let log_dir = lookup(LOG_DIR_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

fn accept_env_file(loaded: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
    match loaded {
        Ok(()) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::EnvFile(err)),
    }
}
