//! Parsing a configuration document into validated settings and courses
//!
//! The document arrives already decoded (JSON, YAML or TOML) as a
//! [`serde_json::Value`]. It is read through loosely-typed raw structs and
//! then validated into domain types. Every failure is reported as a single
//! [`Error::ConfigValidation`] whose context names the offending field,
//! e.g. `courses[1].config.rules.entries[0].update`.

use std::path::{Path, PathBuf};

use lms_fs::{ConfigStore, expand_home};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::course::{CategoryRule, CourseConfig, EntryRule, FileRule, NameRule};
use super::defaults::ConfigDefaults;
use super::semester::Semester;
use super::types::{ConfigType, LogLevel, UpdateType};
use crate::catalog::CourseInfo;
use crate::matcher::PatternMatcher;
use crate::{Error, Result};

/// Summary report settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySettings {
    pub enabled: bool,
    pub dir: PathBuf,
    pub expire_days: u32,
}

/// Settings that apply to every course.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub cache_dir: PathBuf,
    pub destination_base: PathBuf,
    pub log_level: LogLevel,
    pub show_hidden_courses: bool,
    pub default_update_type: UpdateType,
    pub default_config_type: ConfigType,
    /// File names matching any of these are never materialized
    pub ignored_files: Vec<PatternMatcher>,
    pub summary: SummarySettings,
}

/// A fully validated configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: Settings,
    pub courses: Vec<CourseConfig>,
}

impl Config {
    /// Validate a decoded configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] describing the first malformed
    /// field.
    pub fn from_document(document: &Value, defaults: &ConfigDefaults) -> Result<Self> {
        if !document.is_object() {
            return Err(Error::config("document", "configuration must be a mapping"));
        }
        let raw: RawDocument = decode(document, "document")?;

        let log_level = match raw.log_level {
            Some(level) => level.parse().map_err(|e| rewrap("document", e))?,
            None => defaults.log_level,
        };
        let default_update_type = match raw.update {
            Some(update) => update.parse().map_err(|e| rewrap("document", e))?,
            None => defaults.update_type,
        };
        let default_config_type = match raw.config_type {
            Some(ty) => parse_config_type(&ty, "document")?,
            None => defaults.config_type,
        };

        let summary = match raw.summary {
            Some(summary) => SummarySettings {
                enabled: summary.enabled.unwrap_or(defaults.summary_enabled),
                dir: summary
                    .path
                    .map(expand_home)
                    .unwrap_or_else(|| defaults.summary_dir.clone()),
                expire_days: summary.expire_days.unwrap_or(defaults.summary_expire_days),
            },
            None => SummarySettings {
                enabled: defaults.summary_enabled,
                dir: defaults.summary_dir.clone(),
                expire_days: defaults.summary_expire_days,
            },
        };

        let ignored_files = raw
            .ignored_files
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let context = format!("ignored_files[{i}]");
                let raw: RawMatcher = decode(value, &context)?;
                build_matcher(raw.pattern, raw.match_type, "ignored_files entry")
                    .map_err(|e| rewrap(&context, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let settings = Settings {
            cache_dir: raw
                .cache_dir
                .map(expand_home)
                .unwrap_or_else(|| defaults.cache_dir.clone()),
            destination_base: raw
                .destination_base
                .map(expand_home)
                .unwrap_or_else(|| defaults.destination_base.clone()),
            log_level,
            show_hidden_courses: raw
                .show_hidden_courses
                .unwrap_or(defaults.show_hidden_courses),
            default_update_type,
            default_config_type,
            ignored_files,
            summary,
        };

        let courses = raw
            .courses
            .iter()
            .enumerate()
            .map(|(i, value)| parse_course(value, &settings, &format!("courses[{i}]")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { settings, courses })
    }

    /// Load and validate a configuration file.
    ///
    /// Syntax errors are reported as [`Error::ConfigValidation`] like any
    /// other malformed document; unreadable files stay I/O errors.
    pub fn load(path: &Path, defaults: &ConfigDefaults) -> Result<Self> {
        let document = ConfigStore::new()
            .load_document(path)
            .map_err(|e| match e {
                lms_fs::Error::ConfigParse { .. } | lms_fs::Error::UnsupportedFormat { .. } => {
                    Error::config("document", e.to_string())
                }
                other => Error::Fs(other),
            })?;
        Self::from_document(&document, defaults)
    }

    /// The first course config that describes the given remote course.
    pub fn find_course(&self, course: &CourseInfo) -> Option<&CourseConfig> {
        self.courses.iter().find(|c| c.matches(course))
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    cache_dir: Option<String>,
    destination_base: Option<String>,
    log_level: Option<String>,
    show_hidden_courses: Option<bool>,
    update: Option<String>,
    config_type: Option<String>,
    summary: Option<RawSummary>,
    #[serde(default)]
    ignored_files: Vec<Value>,
    #[serde(default)]
    courses: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    enabled: Option<bool>,
    path: Option<String>,
    expire_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawMatcher {
    pattern: Option<String>,
    match_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCourse {
    pattern: Option<String>,
    match_type: Option<String>,
    semester: Option<String>,
    destination_base: Option<String>,
    update: Option<String>,
    config_type: Option<String>,
    // Rules declared outside `config.rules` are only checked, never used
    categories: Option<Value>,
    entries: Option<Value>,
    #[serde(default)]
    config: RawCourseBody,
}

#[derive(Debug, Default, Deserialize)]
struct RawCourseBody {
    #[serde(default)]
    rules: RawRules,
}

#[derive(Debug, Default, Deserialize)]
struct RawRules {
    #[serde(default)]
    categories: Vec<Value>,
    #[serde(default)]
    entries: Vec<Value>,
    #[serde(default)]
    files: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCategoryRule {
    pattern: Option<String>,
    match_type: Option<String>,
    destination: Option<String>,
    update: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawNameRule {
    pattern: Option<String>,
    match_type: Option<String>,
    directory: Option<String>,
    update: Option<String>,
    #[serde(default)]
    ignore: bool,
}

fn decode<T: DeserializeOwned>(value: &Value, context: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::config(context, e.to_string()))
}

/// Re-home an error raised by a nested parser under `context`.
fn rewrap(context: &str, err: Error) -> Error {
    match err {
        Error::ConfigValidation {
            context: inner,
            message,
        } => Error::config(format!("{context}.{inner}"), message),
        Error::InvalidPattern { pattern, message } => Error::config(
            format!("{context}.pattern"),
            format!("invalid pattern '{pattern}': {message}"),
        ),
        Error::UnsupportedConfigType { config_type } => Error::config(
            format!("{context}.config_type"),
            format!("unknown config type '{config_type}'"),
        ),
        other => Error::config(context, other.to_string()),
    }
}

fn parse_config_type(value: &str, context: &str) -> Result<ConfigType> {
    value.parse().map_err(|e| rewrap(context, e))
}

fn parse_update(value: Option<String>) -> Result<Option<UpdateType>> {
    value.map(|u| u.parse()).transpose()
}

fn build_matcher(
    pattern: Option<String>,
    match_type: Option<String>,
    what: &str,
) -> Result<PatternMatcher> {
    match (pattern, match_type) {
        (Some(pattern), Some(match_type)) => PatternMatcher::parse(pattern, &match_type),
        _ => Err(Error::config(
            "pattern",
            format!("{what} requires 'pattern' and 'match_type' fields"),
        )),
    }
}

fn parse_category_rule(value: &Value, context: &str) -> Result<CategoryRule> {
    let raw: RawCategoryRule = decode(value, context)?;
    let build = || -> Result<CategoryRule> {
        let matcher = build_matcher(raw.pattern, raw.match_type, "category rule")?;
        Ok(CategoryRule {
            title_matcher: matcher,
            destination: raw.destination.map(expand_home),
            update_type: parse_update(raw.update)?,
        })
    };
    build().map_err(|e| rewrap(context, e))
}

fn parse_name_rule(value: &Value, context: &str, what: &str) -> Result<NameRule> {
    let raw: RawNameRule = decode(value, context)?;
    let build = || -> Result<NameRule> {
        let matcher = build_matcher(raw.pattern, raw.match_type, what)?;
        Ok(NameRule {
            name_matcher: matcher,
            directory: raw.directory.map(expand_home),
            update_type: parse_update(raw.update)?,
            ignore: raw.ignore,
        })
    };
    build().map_err(|e| rewrap(context, e))
}

fn parse_course(value: &Value, settings: &Settings, context: &str) -> Result<CourseConfig> {
    let raw: RawCourse = decode(value, context)?;

    let title_matcher =
        build_matcher(raw.pattern, raw.match_type, "course").map_err(|e| rewrap(context, e))?;

    let semester: Semester = raw
        .semester
        .ok_or_else(|| Error::config("semester", "course requires 'semester' field"))
        .and_then(|s| s.parse())
        .map_err(|e| rewrap(context, e))?;

    let config_type = match raw.config_type {
        Some(ty) => parse_config_type(&ty, context)?,
        None => settings.default_config_type,
    };
    let update_type = parse_update(raw.update)
        .map_err(|e| rewrap(context, e))?
        .unwrap_or(settings.default_update_type);

    if config_type.is_auto() && (raw.categories.is_some() || raw.entries.is_some()) {
        return Err(Error::config(
            format!("{context}.config_type"),
            format!("auto config type '{config_type}' should not have categories or entries defined"),
        ));
    }
    if config_type == ConfigType::EntryManual && raw.categories.is_some() {
        return Err(Error::config(
            format!("{context}.config_type"),
            "entry_manual config type should not have categories defined",
        ));
    }

    let mut builder = CourseConfig::builder(title_matcher, semester)
        .config_type(config_type)
        .update_type(update_type);
    if let Some(dest) = raw.destination_base {
        builder = builder.destination_base(expand_home(dest));
    }

    let rules = raw.config.rules;
    for (i, value) in rules.categories.iter().enumerate() {
        let rule_context = format!("{context}.config.rules.categories[{i}]");
        builder = builder.category(parse_category_rule(value, &rule_context)?);
    }
    for (i, value) in rules.entries.iter().enumerate() {
        let rule_context = format!("{context}.config.rules.entries[{i}]");
        let rule: EntryRule = parse_name_rule(value, &rule_context, "entry rule")?;
        builder = builder.entry(rule);
    }
    for (i, value) in rules.files.iter().enumerate() {
        let rule_context = format!("{context}.config.rules.files[{i}]");
        let rule: FileRule = parse_name_rule(value, &rule_context, "file rule")?;
        builder = builder.file(rule);
    }

    builder.build().map_err(|e| rewrap(context, e))
}
