//! Shared test utilities for the lms-sync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`archive`]: zip archives with explicit per-entry timestamps
//! - [`tree`]: [`TestTree`] for destination, cache and mirror directories

pub mod archive;
pub mod tree;

pub use archive::{ArchiveBuilder, stamp, stamp_time};
pub use tree::TestTree;
