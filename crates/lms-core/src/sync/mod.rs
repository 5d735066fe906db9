//! Archive Synchronizer
//!
//! Walks a course archive entry by entry, resolves each entry to an
//! extraction rule, applies file rules and the update policy, and installs
//! the file with the archive's modification time. Every entry ends in one
//! of three states: materialized, skipped or no match.
//!
//! Entries are decompressed into a private staging directory first and
//! only then copied over the destination, so an interrupted write never
//! damages an existing file. The staging directory is removed when the
//! run ends, whatever the outcome.

mod archive;
mod policy;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use lms_fs::{ArchivePath, split_extension};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::{FileRule, UpdateType};
use crate::matcher::PatternMatcher;
use crate::rules::ResolvedExtractionRule;
use crate::summary::{SummaryRecord, SummaryRecorder, SummaryStatus};
use crate::{Error, Result};

/// Everything [`synchronize`] needs besides the archive itself.
#[derive(Debug, Clone, Copy)]
pub struct SyncRequest<'a> {
    pub course_name: &'a str,
    /// Course destination; relative file rule directories resolve here
    pub destination_base: &'a Path,
    pub rules: &'a [ResolvedExtractionRule],
    pub ignored_files: &'a [PatternMatcher],
    pub file_rules: &'a [FileRule],
    /// Parent of the staging directory; the system temp dir when unset
    pub staging_root: Option<&'a Path>,
}

impl<'a> SyncRequest<'a> {
    pub fn new(
        course_name: &'a str,
        destination_base: &'a Path,
        rules: &'a [ResolvedExtractionRule],
    ) -> Self {
        Self {
            course_name,
            destination_base,
            rules,
            ignored_files: &[],
            file_rules: &[],
            staging_root: None,
        }
    }

    pub fn with_ignored_files(mut self, ignored_files: &'a [PatternMatcher]) -> Self {
        self.ignored_files = ignored_files;
        self
    }

    pub fn with_file_rules(mut self, file_rules: &'a [FileRule]) -> Self {
        self.file_rules = file_rules;
        self
    }

    pub fn with_staging_root(mut self, staging_root: &'a Path) -> Self {
        self.staging_root = Some(staging_root);
        self
    }
}

/// Per-state entry counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub materialized: usize,
    pub skipped: usize,
    pub no_match: usize,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.materialized + self.skipped + self.no_match
    }
}

/// Where an archive entry goes, before the filesystem is consulted.
#[derive(Debug)]
enum Plan {
    NoMatch,
    Skip,
    Write {
        destination: PathBuf,
        update_type: UpdateType,
    },
}

/// What the update policy decided for an existing or missing destination.
#[derive(Debug)]
enum Decision {
    Skip,
    Write {
        target: PathBuf,
        status: SummaryStatus,
    },
}

/// Synchronize one course archive into its destination tree.
///
/// # Errors
///
/// Returns [`Error::ArchiveRead`] if the archive cannot be opened or an
/// entry cannot be read, and [`Error::Filesystem`] for I/O faults while
/// staging or installing files.
pub fn synchronize(
    archive_path: &Path,
    request: &SyncRequest<'_>,
    mut recorder: Option<&mut SummaryRecorder>,
) -> Result<SyncReport> {
    let mut zip = archive::open(archive_path)?;
    let staging = create_staging(request.staging_root)?;
    let mut report = SyncReport::default();

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| Error::archive(archive_path, e))?;
        let path = ArchivePath::new(entry.name());

        let (destination, update_type) = match plan_entry(&path, entry.is_dir(), request) {
            Plan::NoMatch => {
                report.no_match += 1;
                continue;
            }
            Plan::Skip => {
                report.skipped += 1;
                continue;
            }
            Plan::Write {
                destination,
                update_type,
            } => (destination, update_type),
        };

        let archived_at = archive::entry_modified(entry.last_modified());
        let (target, status) = match decide(&destination, update_type, archived_at)? {
            Decision::Skip => {
                debug!(path = %destination.display(), "Destination up to date, skipping");
                report.skipped += 1;
                continue;
            }
            Decision::Write { target, status } => (target, status),
        };

        let staged = staging.path().join(format!("entry-{index}"));
        archive::stage_entry(&mut entry, &staged)?;
        lms_fs::io::install_file(&staged, &target, Some(archived_at))
            .map_err(Error::from_fs_write)?;
        let _ = fs::remove_file(&staged);

        info!(
            course = %request.course_name,
            status = %status,
            path = %target.display(),
            "Synchronized file"
        );
        report.materialized += 1;

        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.add_record(summary_record(request, &path, &destination, &target, status));
        }
    }

    debug!(
        course = %request.course_name,
        materialized = report.materialized,
        skipped = report.skipped,
        no_match = report.no_match,
        "Archive walk finished"
    );
    Ok(report)
}

fn create_staging(root: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("lms-sync-staging-");
    match root {
        Some(root) => {
            fs::create_dir_all(root).map_err(|e| Error::filesystem(root, e))?;
            builder.tempdir_in(root).map_err(|e| Error::filesystem(root, e))
        }
        None => builder
            .tempdir()
            .map_err(|e| Error::filesystem(std::env::temp_dir(), e)),
    }
}

/// Resolve an entry to a destination without touching the filesystem.
fn plan_entry(path: &ArchivePath, is_dir: bool, request: &SyncRequest<'_>) -> Plan {
    if is_dir || path.is_dir() {
        return Plan::NoMatch;
    }
    if path.has_traversal() {
        warn!(entry = %path, "Archive entry escapes its directory, ignoring");
        return Plan::NoMatch;
    }
    let (Some(category), Some(entry_name)) = (path.category(), path.entry()) else {
        debug!(entry = %path, "Archive entry outside category/entry layout");
        return Plan::NoMatch;
    };

    let rule = ResolvedExtractionRule::first_match(request.rules, category, entry_name).or_else(
        || {
            // A bare file directly under the category may be named after
            // its entry plus an extension
            if path.len() != 2 {
                return None;
            }
            let (stem, _) = split_extension(entry_name);
            ResolvedExtractionRule::first_match(request.rules, category, stem)
        },
    );
    let Some(rule) = rule else {
        debug!(entry = %path, "No extraction rule matched");
        return Plan::NoMatch;
    };
    if rule.ignore {
        debug!(entry = %path, "Entry ignored by rule");
        return Plan::Skip;
    }

    let mut destination = rule.directory.join(path.after_category());
    let file_name = match destination.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Plan::NoMatch,
    };

    if request.ignored_files.iter().any(|m| m.matches(&file_name)) {
        debug!(file = %file_name, "File matches an ignored-file pattern");
        return Plan::Skip;
    }

    let mut update_type = rule.update_type;
    if let Some(file_rule) = request.file_rules.iter().find(|r| r.matches(&file_name)) {
        if file_rule.ignore {
            debug!(file = %file_name, "File ignored by file rule");
            return Plan::Skip;
        }
        if let Some(directory) = &file_rule.directory {
            destination = request.destination_base.join(directory).join(&file_name);
        }
        if let Some(file_update) = file_rule.update_type {
            update_type = file_update;
        }
    }

    Plan::Write {
        destination,
        update_type,
    }
}

/// Apply the staleness check and the update policy.
fn decide(destination: &Path, update_type: UpdateType, archived_at: SystemTime) -> Result<Decision> {
    let newest_local = policy::newest_local_mtime(destination).map_err(lift_local_error)?;
    let Some(newest_local) = newest_local else {
        return Ok(Decision::Write {
            target: destination.to_path_buf(),
            status: SummaryStatus::Added,
        });
    };
    if newest_local >= archived_at {
        return Ok(Decision::Skip);
    }

    Ok(match update_type {
        UpdateType::Overwrite => Decision::Write {
            target: destination.to_path_buf(),
            status: SummaryStatus::Overwritten,
        },
        UpdateType::Skip => Decision::Skip,
        UpdateType::Rename => Decision::Write {
            target: policy::next_free_path(destination),
            status: SummaryStatus::Renamed,
        },
    })
}

fn lift_local_error(err: Error) -> Error {
    match err {
        Error::Fs(inner) => Error::from_fs_write(inner),
        other => other,
    }
}

fn summary_record(
    request: &SyncRequest<'_>,
    path: &ArchivePath,
    destination: &Path,
    target: &Path,
    status: SummaryStatus,
) -> SummaryRecord {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let detail = match status {
        SummaryStatus::Added => "new file".to_string(),
        SummaryStatus::Overwritten => "replaced existing file".to_string(),
        SummaryStatus::Renamed => format!(
            "{} already exists, stored as {file_name}",
            destination.display()
        ),
        SummaryStatus::Skipped => "unchanged".to_string(),
    };
    SummaryRecord {
        stored_path: target.to_path_buf(),
        course_name: request.course_name.to_string(),
        category_name: path.category().unwrap_or_default().to_string(),
        entry_name: path.entry().unwrap_or_default().to_string(),
        file_name,
        status,
        detail,
    }
}
