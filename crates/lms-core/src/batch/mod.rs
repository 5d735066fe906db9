//! Multi-course orchestration
//!
//! For each remote course with a matching course config: fetch the
//! catalog, compile rules, request the filtered archive and synchronize
//! it. A failure confined to one course is recorded and the batch moves on.

use std::fs;

use tracing::{debug, info, warn};

use crate::catalog::CourseInfo;
use crate::config::{Config, CourseConfig};
use crate::rules::compile_rules;
use crate::session::CourseSession;
use crate::summary::SummaryRecorder;
use crate::sync::{SyncReport, SyncRequest, synchronize};
use crate::{Error, Result};

/// How one course ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseOutcome {
    Synced(SyncReport),
    /// The rules selected no remote entries
    NothingSelected,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseReport {
    pub course_id: String,
    pub title: String,
    pub outcome: CourseOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub courses: Vec<CourseReport>,
    /// Remote courses no course config matched
    pub unmatched: usize,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &CourseReport> {
        self.courses
            .iter()
            .filter(|c| matches!(c.outcome, CourseOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Files written across all courses.
    pub fn materialized(&self) -> usize {
        self.courses
            .iter()
            .map(|c| match &c.outcome {
                CourseOutcome::Synced(report) => report.materialized,
                _ => 0,
            })
            .sum()
    }
}

/// Runs every configured course of a [`Config`] against a session.
#[derive(Debug)]
pub struct BatchRunner<'a> {
    config: &'a Config,
}

impl<'a> BatchRunner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Process all matching courses sequentially.
    ///
    /// # Errors
    ///
    /// Fails only when the course list cannot be fetched or an error is
    /// not confined to one course (see [`Error::is_course_scoped`]).
    pub fn run(
        &self,
        session: &dyn CourseSession,
        mut recorder: Option<&mut SummaryRecorder>,
    ) -> Result<BatchReport> {
        let settings = &self.config.settings;
        let courses = session.list_courses(settings.show_hidden_courses)?;
        let mut report = BatchReport::default();

        for course in &courses {
            let Some(course_config) = self.config.find_course(course) else {
                debug!(course = %course.title, "No course config matched");
                report.unmatched += 1;
                continue;
            };

            info!(course = %course.title, "Processing course");
            let outcome = match self.run_course(
                session,
                course,
                course_config,
                recorder.as_deref_mut(),
            ) {
                Ok(outcome) => outcome,
                Err(e) if e.is_course_scoped() => {
                    warn!(course = %course.title, error = %e, "Course failed, continuing");
                    CourseOutcome::Failed(e.to_string())
                }
                Err(e) => return Err(e),
            };
            report.courses.push(CourseReport {
                course_id: course.id.clone(),
                title: course.title.clone(),
                outcome,
            });
        }

        Ok(report)
    }

    fn run_course(
        &self,
        session: &dyn CourseSession,
        course: &CourseInfo,
        course_config: &CourseConfig,
        recorder: Option<&mut SummaryRecorder>,
    ) -> Result<CourseOutcome> {
        let settings = &self.config.settings;
        let catalog = session.fetch_catalog(&course.id)?;
        let destination = course_config.destination_for(&settings.destination_base, &course.title);
        let compiled = compile_rules(course_config, &catalog, &destination);

        let selection = compiled.filter.apply(&catalog);
        if selection.is_empty() {
            info!(course = %course.title, "No entries selected");
            return Ok(CourseOutcome::NothingSelected);
        }

        fs::create_dir_all(&settings.cache_dir)
            .map_err(|e| Error::filesystem(&settings.cache_dir, e))?;
        // Removed on drop, whichever way this function returns
        let archive = tempfile::Builder::new()
            .prefix("lms-sync-")
            .suffix(".zip")
            .tempfile_in(&settings.cache_dir)
            .map_err(|e| Error::filesystem(&settings.cache_dir, e))?;

        if !session.fetch_archive(&course.id, &selection, archive.path())? {
            return Ok(CourseOutcome::NothingSelected);
        }

        let request = SyncRequest::new(&course.title, &destination, &compiled.rules)
            .with_ignored_files(&settings.ignored_files)
            .with_file_rules(course_config.files())
            .with_staging_root(&settings.cache_dir);
        let report = synchronize(archive.path(), &request, recorder)?;
        Ok(CourseOutcome::Synced(report))
    }
}
