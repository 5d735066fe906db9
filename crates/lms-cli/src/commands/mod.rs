//! Command implementations for lms-cli

pub mod check;
pub mod extract;
pub mod summary;
pub mod sync;

pub use check::run_check;
pub use extract::{ExtractArgs, run_extract};
pub use summary::run_clean_summaries;
pub use sync::run_sync;
