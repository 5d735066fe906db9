//! Enumerated configuration values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Action taken when a destination file already exists and the archive
/// holds a newer version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    /// Keep the existing file and store the new one as `name_<n>.ext`
    #[default]
    Rename,
    /// Replace the existing file
    Overwrite,
    /// Leave the existing file alone
    Skip,
}

impl FromStr for UpdateType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rename" => Ok(UpdateType::Rename),
            "overwrite" => Ok(UpdateType::Overwrite),
            "skip" => Ok(UpdateType::Skip),
            _ => Err(Error::config(
                "update",
                format!("unknown update type '{s}', expected rename, overwrite or skip"),
            )),
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateType::Rename => write!(f, "rename"),
            UpdateType::Overwrite => write!(f, "overwrite"),
            UpdateType::Skip => write!(f, "skip"),
        }
    }
}

/// How a course's remote categories and entries are turned into rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigType {
    /// One sub-directory per remote category
    #[default]
    CategoryAuto,
    /// Only categories matched by a category rule, with per-entry overrides
    CategoryManual,
    /// Every entry lands directly in the course destination
    EntryAuto,
    /// Only entries matched by an entry rule
    EntryManual,
}

impl ConfigType {
    /// Whether this type derives its rules from the remote catalog alone.
    pub fn is_auto(&self) -> bool {
        matches!(self, ConfigType::CategoryAuto | ConfigType::EntryAuto)
    }
}

impl FromStr for ConfigType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "category_auto" => Ok(ConfigType::CategoryAuto),
            "category_manual" => Ok(ConfigType::CategoryManual),
            "entry_auto" => Ok(ConfigType::EntryAuto),
            "entry_manual" => Ok(ConfigType::EntryManual),
            _ => Err(Error::UnsupportedConfigType {
                config_type: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigType::CategoryAuto => write!(f, "category_auto"),
            ConfigType::CategoryManual => write!(f, "category_manual"),
            ConfigType::EntryAuto => write!(f, "entry_auto"),
            ConfigType::EntryManual => write!(f, "entry_manual"),
        }
    }
}

/// Verbosity accepted by the `log_level` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The equivalent `tracing` filter directive.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(Error::config(
                "log_level",
                format!("invalid log_level '{s}', must be one of DEBUG, INFO, WARNING, ERROR"),
            )),
        }
    }
}
