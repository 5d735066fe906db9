//! The remote-site collaborator
//!
//! Authentication, page scraping and HTTP transport live behind
//! [`CourseSession`]. The engine only needs the course list, each course's
//! catalog and an archive restricted to a selection of that catalog.

mod mirror;

use std::path::Path;

use crate::Result;
use crate::catalog::{CourseInfo, RemoteCatalog};

pub use mirror::MirrorSession;

/// Access to one logged-in remote site.
pub trait CourseSession {
    /// Courses visible to the user; hidden courses only when asked for.
    fn list_courses(&self, show_hidden: bool) -> Result<Vec<CourseInfo>>;

    /// Categories and entries offered for a course.
    fn fetch_catalog(&self, course_id: &str) -> Result<RemoteCatalog>;

    /// Download an archive holding only `selection` into `dest`.
    ///
    /// Returns `false` when nothing was selected and no archive was
    /// written.
    fn fetch_archive(&self, course_id: &str, selection: &RemoteCatalog, dest: &Path)
    -> Result<bool>;
}
