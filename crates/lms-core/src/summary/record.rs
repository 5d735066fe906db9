use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Outcome of one synchronization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    Added,
    Overwritten,
    Renamed,
    Skipped,
}

impl SummaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStatus::Added => "added",
            SummaryStatus::Overwritten => "overwritten",
            SummaryStatus::Renamed => "renamed",
            SummaryStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStatus {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "added" => Ok(SummaryStatus::Added),
            "overwritten" => Ok(SummaryStatus::Overwritten),
            "renamed" => Ok(SummaryStatus::Renamed),
            "skipped" => Ok(SummaryStatus::Skipped),
            _ => Err(Error::config("status", format!("unknown summary status '{s}'"))),
        }
    }
}

/// One materialized file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub stored_path: PathBuf,
    pub course_name: String,
    pub category_name: String,
    pub entry_name: String,
    pub file_name: String,
    pub status: SummaryStatus,
    pub detail: String,
}

impl SummaryRecord {
    /// Field values in report column order.
    pub fn columns(&self) -> [String; 7] {
        [
            self.stored_path.display().to_string(),
            self.course_name.clone(),
            self.category_name.clone(),
            self.entry_name.clone(),
            self.file_name.clone(),
            self.status.to_string(),
            self.detail.clone(),
        ]
    }
}

/// Accumulates records for one run.
#[derive(Debug, Default)]
pub struct SummaryRecorder {
    records: Vec<SummaryRecord>,
}

impl SummaryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: SummaryRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SummaryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record count per status, in order of first appearance.
    pub fn counts(&self) -> Vec<(SummaryStatus, usize)> {
        let mut counts: Vec<(SummaryStatus, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(status, _)| *status == record.status) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.status, 1)),
            }
        }
        counts
    }

    /// Human-readable aggregate of the run.
    pub fn render(&self) -> String {
        let mut out = format!("Total updated files: {}.", self.records.len());
        if self.records.is_empty() {
            out.push_str(" No files were updated.");
            return out;
        }

        let details: Vec<String> = self
            .counts()
            .iter()
            .map(|(status, count)| format!("{status}: {count}"))
            .collect();
        out.push_str(" Details: ");
        out.push_str(&details.join(", "));
        out.push_str("\nUpdated files:");
        for record in &self.records {
            out.push_str(&format!("\n- [{}] {}", record.status, record.stored_path.display()));
        }
        out
    }
}
