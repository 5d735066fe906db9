use std::fs::File;
use std::path::{Path, PathBuf};

use lms_fs::{ArchivePath, split_extension};
use tracing::debug;
use zip::{ZipArchive, ZipWriter};

use super::CourseSession;
use crate::catalog::{CourseInfo, RemoteCatalog};
use crate::{Error, Result};

/// A session replaying a site snapshot stored on disk.
///
/// Layout:
///
/// ```text
/// <root>/courses.json          list of courses
/// <root>/<id>/catalog.json     the course's catalog
/// <root>/<id>/archive.zip      the full course archive
/// ```
///
/// Archives handed out are filtered down to the requested selection, the
/// way the remote site builds them server-side.
#[derive(Debug, Clone)]
pub struct MirrorSession {
    root: PathBuf,
}

impl MirrorSession {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn course_dir(&self, course_id: &str) -> PathBuf {
        self.root.join(course_id)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let text = lms_fs::io::read_text(path)
            .map_err(|e| Error::session(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::session(format!("malformed {}: {e}", path.display())))
    }
}

/// Whether an archive entry belongs to the selection. Entries outside the
/// `category/entry` layout are always kept.
fn selected(selection: &RemoteCatalog, path: &ArchivePath) -> bool {
    let (Some(category), Some(entry)) = (path.category(), path.entry()) else {
        return true;
    };
    let (stem, _) = split_extension(entry);
    selection
        .categories
        .iter()
        .filter(|c| c.title == category)
        .flat_map(|c| c.entries.iter())
        .any(|e| e.title == entry || e.title == stem)
}

impl CourseSession for MirrorSession {
    fn list_courses(&self, show_hidden: bool) -> Result<Vec<CourseInfo>> {
        let courses: Vec<CourseInfo> = self.read_json(&self.root.join("courses.json"))?;
        Ok(courses
            .into_iter()
            .filter(|course| show_hidden || !course.hidden)
            .collect())
    }

    fn fetch_catalog(&self, course_id: &str) -> Result<RemoteCatalog> {
        self.read_json(&self.course_dir(course_id).join("catalog.json"))
    }

    fn fetch_archive(
        &self,
        course_id: &str,
        selection: &RemoteCatalog,
        dest: &Path,
    ) -> Result<bool> {
        if selection.is_empty() {
            return Ok(false);
        }

        let source_path = self.course_dir(course_id).join("archive.zip");
        let source = File::open(&source_path).map_err(|e| {
            Error::session(format!("cannot open {}: {e}", source_path.display()))
        })?;
        let mut source = ZipArchive::new(source).map_err(|e| Error::archive(&source_path, e))?;

        let out = File::create(dest).map_err(|e| Error::filesystem(dest, e))?;
        let mut writer = ZipWriter::new(out);
        let mut copied = 0usize;
        for index in 0..source.len() {
            let file = source
                .by_index(index)
                .map_err(|e| Error::archive(&source_path, e))?;
            if !selected(selection, &ArchivePath::new(file.name())) {
                continue;
            }
            writer
                .raw_copy_file(file)
                .map_err(|e| Error::archive(dest, e))?;
            copied += 1;
        }
        writer.finish().map_err(|e| Error::archive(dest, e))?;

        debug!(course = course_id, entries = copied, "Mirror archive prepared");
        Ok(true)
    }
}
