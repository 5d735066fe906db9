//! The extract command

use std::path::PathBuf;

use colored::Colorize;
use lms_core::{
    Config, RemoteCatalog, SummaryRecorder, SyncRequest, compile_rules, synchronize,
};
use lms_fs::ConfigStore;

use super::summary::finish_summary;
use crate::error::{CliError, Result};

/// Inputs of [`run_extract`].
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    pub course: usize,
    pub catalog: PathBuf,
    pub archive: PathBuf,
    pub title: Option<String>,
}

/// Compile one course config against a catalog file and synchronize a
/// local archive with the result.
pub fn run_extract(config: &Config, args: &ExtractArgs) -> Result<()> {
    let course = config.courses.get(args.course).ok_or_else(|| {
        CliError::user(format!(
            "no course config at index {} ({} configured)",
            args.course,
            config.courses.len()
        ))
    })?;
    let catalog: RemoteCatalog = ConfigStore::new().load(&args.catalog)?;

    let title = args
        .title
        .clone()
        .unwrap_or_else(|| course.title_matcher().pattern().to_string());
    let settings = &config.settings;
    let destination = course.destination_for(&settings.destination_base, &title);
    let compiled = compile_rules(course, &catalog, &destination);

    println!(
        "{} Extracting {} into {}",
        "=>".blue().bold(),
        args.archive.display().to_string().cyan(),
        destination.display().to_string().cyan()
    );
    println!(
        "   {} rule(s), {} of {} entries selected",
        compiled.rules.len(),
        compiled.filter.apply(&catalog).entry_count(),
        catalog.entry_count()
    );

    let mut recorder = SummaryRecorder::new();
    let request = SyncRequest::new(&title, &destination, &compiled.rules)
        .with_ignored_files(&settings.ignored_files)
        .with_file_rules(course.files())
        .with_staging_root(&settings.cache_dir);
    let report = synchronize(&args.archive, &request, Some(&mut recorder))?;

    println!(
        "   {} {} written, {} skipped, {} unmatched",
        "OK".green(),
        report.materialized,
        report.skipped,
        report.no_match
    );
    finish_summary(config, &recorder)
}
