//! Runtime configuration for hosts embedding the registry store.
//!
//! # Responsibility
//! - Describe which backing medium to use and how to reach it.
//! - Carry optional logging and cache tuning without code changes.
//!
//! # Invariants
//! - Loaded configs are validated before any medium is built.
//! - Missing optional fields fall back to the same defaults the builders
//!   use.

use crate::logging::default_log_level;
use crate::medium::sheets::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKSHEET};
use crate::store::DEFAULT_CACHE_TTL;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Listing-cache freshness window in seconds. Zero disables caching.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Backing medium selection.
    pub medium: MediumConfig,
    /// Optional file-logging bootstrap.
    #[serde(default)]
    pub log: Option<LogConfig>,
}

impl RegistryConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Rejects configs that would build an unusable medium.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.medium {
            MediumConfig::Csv { path } => {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::Invalid(
                        "medium.path must not be empty".to_string(),
                    ));
                }
            }
            MediumConfig::Sheets {
                spreadsheet_id,
                worksheet,
                base_url,
                timeout_secs,
                ..
            } => {
                if !is_valid_spreadsheet_id(spreadsheet_id) {
                    return Err(ConfigError::Invalid(format!(
                        "medium.spreadsheet_id `{spreadsheet_id}` must be non-empty and use only letters, digits, `-` or `_`"
                    )));
                }
                if worksheet.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "medium.worksheet must not be empty".to_string(),
                    ));
                }
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(ConfigError::Invalid(format!(
                        "medium.base_url `{base_url}` must start with http:// or https://"
                    )));
                }
                if *timeout_secs == 0 {
                    return Err(ConfigError::Invalid(
                        "medium.timeout_secs must be at least 1".to_string(),
                    ));
                }
            }
        }
        if let Some(log) = &self.log {
            if log.dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "log.dir must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Backing medium selection, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediumConfig {
    /// Local CSV flat file.
    Csv { path: PathBuf },
    /// Remote spreadsheet worksheet.
    Sheets {
        spreadsheet_id: String,
        #[serde(default = "default_worksheet")]
        worksheet: String,
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default)]
        api_token: Option<String>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl MediumConfig {
    /// Stable short name used in logging events.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Csv { .. } => "csv",
            Self::Sheets { .. } => "sheets",
        }
    }
}

/// File-logging bootstrap settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level_name")]
    pub level: String,
    pub dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    /// Config file cannot be read.
    Io { path: PathBuf, source: io::Error },
    /// Config file is not valid TOML for this schema.
    Parse { path: PathBuf, message: String },
    /// Config parsed but describes an unusable setup.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "cannot parse config `{}`: {message}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } | Self::Invalid(_) => None,
        }
    }
}

/// Loads and validates a TOML config file.
pub fn load_config(path: &Path) -> Result<RegistryConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RegistryConfig = toml::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

fn is_valid_spreadsheet_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_worksheet() -> String {
    DEFAULT_WORKSHEET.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level_name() -> String {
    default_log_level().to_string()
}
