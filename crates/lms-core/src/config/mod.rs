//! Configuration Model
//!
//! Typed course, category, entry and file rules plus global settings,
//! validated from a decoded configuration document.

mod course;
mod defaults;
mod document;
mod semester;
mod types;

pub use course::{CategoryRule, CourseConfig, CourseConfigBuilder, EntryRule, FileRule, NameRule};
pub use defaults::ConfigDefaults;
pub use document::{Config, Settings, SummarySettings};
pub use semester::Semester;
pub use types::{ConfigType, LogLevel, UpdateType};
