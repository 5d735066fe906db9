//! Per-course selection rules

use std::path::{Path, PathBuf};

use lms_fs::sanitize_filename;

use super::semester::Semester;
use super::types::{ConfigType, UpdateType};
use crate::catalog::CourseInfo;
use crate::matcher::PatternMatcher;
use crate::{Error, Result};

/// Selects remote categories. Only used by [`ConfigType::CategoryManual`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub title_matcher: PatternMatcher,
    /// Relative paths resolve against the course destination base
    pub destination: Option<PathBuf>,
    pub update_type: Option<UpdateType>,
}

impl CategoryRule {
    pub fn new(title_matcher: PatternMatcher) -> Self {
        Self {
            title_matcher,
            destination: None,
            update_type: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_update_type(mut self, update_type: UpdateType) -> Self {
        self.update_type = Some(update_type);
        self
    }
}

/// Shared shape of [`EntryRule`] and [`FileRule`].
#[derive(Debug, Clone, PartialEq)]
pub struct NameRule {
    pub name_matcher: PatternMatcher,
    pub directory: Option<PathBuf>,
    pub update_type: Option<UpdateType>,
    pub ignore: bool,
}

impl NameRule {
    pub fn new(name_matcher: PatternMatcher) -> Self {
        Self {
            name_matcher,
            directory: None,
            update_type: None,
            ignore: false,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_update_type(mut self, update_type: UpdateType) -> Self {
        self.update_type = Some(update_type);
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name_matcher.matches(name)
    }
}

/// Applies to a remote entry (one selectable unit in a category).
pub type EntryRule = NameRule;

/// Applies to an extracted file by its final file name, after path
/// resolution and regardless of config type.
pub type FileRule = NameRule;

/// Selection rules and destination for one course.
///
/// Built through [`CourseConfig::builder`], which enforces that auto config
/// types declare no category or entry rules and that
/// [`ConfigType::EntryManual`] declares no category rules.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseConfig {
    title_matcher: PatternMatcher,
    semester: Semester,
    destination_base: Option<PathBuf>,
    config_type: ConfigType,
    update_type: UpdateType,
    categories: Vec<CategoryRule>,
    entries: Vec<EntryRule>,
    files: Vec<FileRule>,
}

impl CourseConfig {
    pub fn builder(title_matcher: PatternMatcher, semester: Semester) -> CourseConfigBuilder {
        CourseConfigBuilder {
            config: CourseConfig {
                title_matcher,
                semester,
                destination_base: None,
                config_type: ConfigType::default(),
                update_type: UpdateType::default(),
                categories: Vec::new(),
                entries: Vec::new(),
                files: Vec::new(),
            },
        }
    }

    pub fn title_matcher(&self) -> &PatternMatcher {
        &self.title_matcher
    }

    pub fn semester(&self) -> Semester {
        self.semester
    }

    /// The configured destination, before resolution.
    pub fn destination_base(&self) -> Option<&Path> {
        self.destination_base.as_deref()
    }

    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    /// Default update type for this course.
    pub fn update_type(&self) -> UpdateType {
        self.update_type
    }

    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    pub fn entries(&self) -> &[EntryRule] {
        &self.entries
    }

    pub fn files(&self) -> &[FileRule] {
        &self.files
    }

    /// Whether a remote course is the one this config describes.
    pub fn matches(&self, course: &CourseInfo) -> bool {
        self.title_matcher.matches(&course.title)
            && course.is_winter == self.semester.is_winter
            && course.start_year == self.semester.start_year
    }

    /// Resolve the destination directory for a remote course.
    ///
    /// An explicit destination resolves against `global_base` when relative;
    /// without one, files go to `global_base/<sanitized course title>`.
    pub fn destination_for(&self, global_base: &Path, course_title: &str) -> PathBuf {
        match &self.destination_base {
            Some(dest) => global_base.join(dest),
            None => global_base.join(sanitize_filename(course_title, false)),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.config_type.is_auto() && (!self.categories.is_empty() || !self.entries.is_empty()) {
            return Err(Error::config(
                "config_type",
                format!(
                    "auto config type '{}' should not have categories or entries defined",
                    self.config_type
                ),
            ));
        }
        if self.config_type == ConfigType::EntryManual && !self.categories.is_empty() {
            return Err(Error::config(
                "config_type",
                "entry_manual config type should not have categories defined",
            ));
        }
        Ok(())
    }
}

/// Builder for [`CourseConfig`].
#[derive(Debug, Clone)]
pub struct CourseConfigBuilder {
    config: CourseConfig,
}

impl CourseConfigBuilder {
    pub fn destination_base(mut self, destination: impl Into<PathBuf>) -> Self {
        self.config.destination_base = Some(destination.into());
        self
    }

    pub fn config_type(mut self, config_type: ConfigType) -> Self {
        self.config.config_type = config_type;
        self
    }

    pub fn update_type(mut self, update_type: UpdateType) -> Self {
        self.config.update_type = update_type;
        self
    }

    pub fn category(mut self, rule: CategoryRule) -> Self {
        self.config.categories.push(rule);
        self
    }

    pub fn entry(mut self, rule: EntryRule) -> Self {
        self.config.entries.push(rule);
        self
    }

    pub fn file(mut self, rule: FileRule) -> Self {
        self.config.files.push(rule);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if rules contradict the config type.
    pub fn build(self) -> Result<CourseConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
