//! Runtime configuration shared by both binaries. Resolving the database
//! location here keeps the entry form and the viewer pointed at the same file
//! regardless of where either one is launched from.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".customer-records";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "customers.db";
const LOG_FILE_NAME: &str = "customer-records.log";
const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides the database path.
pub const DB_PATH_ENV: &str = "CUSTOMER_RECORDS_DB";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate home directory")]
    NoHomeDir,
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Keys accepted in `config.toml`. Relative paths resolve against the data
/// directory.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    database_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
}

impl AppConfig {
    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self {
            database_path: data_dir.join(DB_FILE_NAME),
            log_file: data_dir.join(LOG_FILE_NAME),
            log_level: "info".to_string(),
        }
    }

    /// Resolve configuration from `~/.customer-records/`, its optional
    /// `config.toml`, and the `CUSTOMER_RECORDS_DB` override.
    pub fn load() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
        let data_dir = base_dirs.home_dir().join(DATA_DIR_NAME);
        let db_override = env::var_os(DB_PATH_ENV).map(PathBuf::from);
        Self::load_from(&data_dir, db_override)
    }

    /// Layer defaults, the config file in `data_dir` (if present), and an
    /// explicit database override, in that order.
    pub fn load_from(data_dir: &Path, db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::with_data_dir(data_dir);

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            let file = read_file_config(&config_path)?;
            if let Some(path) = file.database_path {
                config.database_path = data_dir.join(path);
            }
            if let Some(path) = file.log_file {
                config.log_file = data_dir.join(path);
            }
            if let Some(level) = file.log_level {
                config.log_level = level;
            }
        }

        if let Some(path) = db_override.filter(|p| !p.as_os_str().is_empty()) {
            config.database_path = path;
        }

        Ok(config)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
