use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Local;
use tracing::{debug, info, warn};

use super::record::SummaryRecorder;
use crate::{Error, Result};

/// File name prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "lms_sync_summary_";

const HEADER: [&str; 7] = [
    "stored_path",
    "course_name",
    "category_name",
    "entry_name",
    "file_name",
    "status",
    "detail",
];

const SECONDS_PER_DAY: u64 = 86_400;

/// Directory of persisted summary reports.
#[derive(Debug, Clone)]
pub struct SummaryStore {
    dir: PathBuf,
    prefix: String,
    expire_days: u32,
}

impl SummaryStore {
    pub fn new(dir: impl Into<PathBuf>, expire_days: u32) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            expire_days,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the recorder's records as `<prefix><YYYYmmdd_HHMMSS>.csv`.
    pub fn persist(&self, recorder: &SummaryRecorder) -> Result<PathBuf> {
        let file_name = format!(
            "{}{}.csv",
            self.prefix,
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.dir.join(file_name);

        let mut content = csv_row(HEADER.iter().copied());
        for record in recorder.records() {
            let columns = record.columns();
            content.push_str(&csv_row(columns.iter().map(String::as_str)));
        }

        lms_fs::io::write_atomic(&path, content.as_bytes())?;
        info!(path = %path.display(), records = recorder.len(), "Summary saved");
        Ok(path)
    }

    /// Delete reports older than `expire_days`. Returns how many were
    /// removed. Individual deletion failures are logged and skipped.
    pub fn sweep_expired(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(Error::filesystem(&self.dir, e)),
        };

        let max_age = Duration::from_secs(u64::from(self.expire_days) * SECONDS_PER_DAY);
        let now = SystemTime::now();
        let mut removed = 0;

        for entry in entries.flatten() {
            let path = entry.path();
            let is_report = entry.file_name().to_string_lossy().starts_with(&self.prefix);
            if !is_report || !path.is_file() {
                continue;
            }

            let age = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .map(|modified| now.duration_since(modified).unwrap_or_default());
            match age {
                Ok(age) if age > max_age => match fs::remove_file(&path) {
                    Ok(()) => {
                        debug!(
                            path = %path.display(),
                            age_days = age.as_secs() / SECONDS_PER_DAY,
                            "Deleted expired summary"
                        );
                        removed += 1;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to delete expired summary");
                    }
                },
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read summary age");
                }
            }
        }
        Ok(removed)
    }
}

fn csv_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = fields
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect();
    let mut row = quoted.join(",");
    row.push('\n');
    row
}
