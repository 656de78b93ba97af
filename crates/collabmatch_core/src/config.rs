//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve database path, log level/directory and seeding switch.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - Resolution never touches the filesystem.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "COLLABMATCH_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "COLLABMATCH_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "COLLABMATCH_LOG_DIR";
pub const SEED_DEMO_ENV: &str = "COLLABMATCH_SEED_DEMO";

const DEFAULT_DB_FILE_NAME: &str = "collabmatch.sqlite3";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidFlag { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFlag { name, value } => write!(
                f,
                "invalid value `{value}` for {name}; expected 1|0|true|false|yes|no|on|off"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// Fill an empty store with sample data on open.
    pub seed_demo_data: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed_demo_data: true,
        }
    }
}

impl CoreConfig {
    /// Reads `COLLABMATCH_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let seed_demo_data = match read(SEED_DEMO_ENV) {
            Some(value) => parse_flag(SEED_DEMO_ENV, &value)?,
            None => defaults.seed_demo_data,
        };

        Ok(Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
            seed_demo_data,
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
