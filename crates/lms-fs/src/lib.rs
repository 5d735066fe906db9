//! Filesystem primitives for lms-sync
//!
//! Provides archive path normalization, filename sanitizing, atomic file
//! installation and format-agnostic configuration document loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{ArchivePath, expand_home, sanitize_filename, split_extension};
