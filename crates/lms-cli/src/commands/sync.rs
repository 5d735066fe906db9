//! The sync command

use std::path::Path;

use colored::Colorize;
use lms_core::{BatchRunner, Config, CourseOutcome, MirrorSession, SummaryRecorder};

use super::summary::finish_summary;
use crate::error::{CliError, Result};

/// Run every configured course against a mirrored site.
pub fn run_sync(config: &Config, mirror: &Path) -> Result<()> {
    if !mirror.is_dir() {
        return Err(CliError::user(format!(
            "mirror directory not found: {}",
            mirror.display()
        )));
    }

    println!(
        "{} Synchronizing from {}",
        "=>".blue().bold(),
        mirror.display().to_string().cyan()
    );

    let session = MirrorSession::new(mirror);
    let mut recorder = SummaryRecorder::new();
    let report = BatchRunner::new(config).run(&session, Some(&mut recorder))?;

    for course in &report.courses {
        match &course.outcome {
            CourseOutcome::Synced(sync) => println!(
                "   {} {}: {} written, {} skipped, {} unmatched",
                "OK".green(),
                course.title,
                sync.materialized,
                sync.skipped,
                sync.no_match
            ),
            CourseOutcome::NothingSelected => {
                println!("   {} {}: nothing selected", "-".dimmed(), course.title)
            }
            CourseOutcome::Failed(message) => {
                println!("   {} {}: {}", "FAILED".red().bold(), course.title, message)
            }
        }
    }
    if report.unmatched > 0 {
        println!("   {} remote course(s) without a course config", report.unmatched);
    }

    finish_summary(config, &recorder)?;

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::user(format!("{failed} course(s) failed")));
    }
    Ok(())
}
