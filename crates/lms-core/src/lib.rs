//! Rule-driven selection and synchronization of course archives
//!
//! This crate turns a user-authored configuration into decisions about
//! which remote course resources to request and where each file of the
//! downloaded archive lands locally:
//!
//! - **Pattern matching**: literal, substring and regex predicates
//! - **Configuration model**: courses, category/entry/file rules, settings
//! - **Rule compiler**: ordered extraction rules plus a remote filter
//! - **Archive synchronizer**: staleness-aware, policy-driven extraction
//! - **Run summary**: per-file outcomes, reports and report retention
//!
//! # Architecture
//!
//! ```text
//!   Config ──> compile_rules(catalog) ──> RemoteFilter ──> CourseSession
//!                     │                                        │
//!                     └──── ResolvedExtractionRule ──> synchronize(archive)
//!                                                              │
//!                                                      SummaryRecorder
//! ```
//!
//! Network access and authentication are outside this crate; they sit
//! behind the [`CourseSession`] trait.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod rules;
pub mod session;
pub mod summary;
pub mod sync;

pub use batch::{BatchReport, BatchRunner, CourseOutcome, CourseReport};
pub use catalog::{CatalogCategory, CatalogEntry, CourseInfo, RemoteCatalog};
pub use config::{
    CategoryRule, Config, ConfigDefaults, ConfigType, CourseConfig, CourseConfigBuilder,
    EntryRule, FileRule, LogLevel, NameRule, Semester, Settings, SummarySettings, UpdateType,
};
pub use error::{Error, Result};
pub use matcher::{MatchKind, PatternMatcher};
pub use rules::{CompiledRules, RemoteFilter, ResolvedExtractionRule, SelectionBuilder, compile_rules};
pub use session::{CourseSession, MirrorSession};
pub use summary::{SummaryRecord, SummaryRecorder, SummaryStatus, SummaryStore};
pub use sync::{SyncReport, SyncRequest, synchronize};
