//! Explicit default values for configuration parsing

use std::path::{Path, PathBuf};

use super::types::{ConfigType, LogLevel, UpdateType};
use crate::{Error, Result};

/// Values used for every setting the configuration document omits.
///
/// Constructed explicitly and handed to
/// [`Config::from_document`](super::Config::from_document); there is no
/// process-wide default state.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDefaults {
    pub cache_dir: PathBuf,
    pub destination_base: PathBuf,
    pub log_level: LogLevel,
    pub show_hidden_courses: bool,
    pub update_type: UpdateType,
    pub config_type: ConfigType,
    pub summary_enabled: bool,
    pub summary_dir: PathBuf,
    pub summary_expire_days: u32,
}

impl ConfigDefaults {
    /// Defaults rooted at the given home directory.
    pub fn for_home(home: &Path) -> Self {
        let cache_dir = home.join(".cache").join("lms-sync");
        Self {
            summary_dir: cache_dir.join("summaries"),
            cache_dir,
            destination_base: home.join("Documents").join("Courses"),
            log_level: LogLevel::Info,
            show_hidden_courses: false,
            update_type: UpdateType::Rename,
            config_type: ConfigType::CategoryAuto,
            summary_enabled: false,
            summary_expire_days: 7,
        }
    }

    /// Defaults rooted at the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if no home directory can be found.
    pub fn from_home_dir() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::config("defaults", "could not determine home directory"))?;
        Ok(Self::for_home(&home))
    }
}
