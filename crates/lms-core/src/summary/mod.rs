//! Run Summary Recorder
//!
//! A [`SummaryRecorder`] is owned by one run and collects one
//! [`SummaryRecord`] per materialized file. [`SummaryStore`] persists a
//! recorder as a delimited report and expires old reports.

mod record;
mod store;

pub use record::{SummaryRecord, SummaryRecorder, SummaryStatus};
pub use store::{DEFAULT_PREFIX, SummaryStore};
