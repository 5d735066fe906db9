//! Zip fixtures.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use chrono::{Local, NaiveDate};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// A zip timestamp. Seconds must be even; zip stores two-second steps.
pub fn stamp(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> DateTime {
    DateTime::from_date_and_time(year, month, day, hour, minute, second)
        .expect("valid zip timestamp")
}

/// The instant a zip timestamp denotes when read as local time.
pub fn stamp_time(stamp: DateTime) -> SystemTime {
    let local = NaiveDate::from_ymd_opt(
        i32::from(stamp.year()),
        u32::from(stamp.month()),
        u32::from(stamp.day()),
    )
    .and_then(|d| {
        d.and_hms_opt(
            u32::from(stamp.hour()),
            u32::from(stamp.minute()),
            u32::from(stamp.second()),
        )
    })
    .and_then(|naive| naive.and_local_timezone(Local).earliest())
    .expect("representable local time");
    SystemTime::from(local)
}

enum Item {
    File {
        name: String,
        content: Vec<u8>,
        modified: DateTime,
    },
    Directory {
        name: String,
    },
}

/// Builds a zip archive entry by entry.
///
/// ```rust,no_run
/// use lms_test_utils::{ArchiveBuilder, stamp};
///
/// let dir = tempfile::TempDir::new().unwrap();
/// ArchiveBuilder::new()
///     .file("Lecture/1_slides.pdf", b"slides")
///     .file_at("Exercise/1_sheet.pdf", b"sheet", stamp(2024, 4, 2, 9, 0, 0))
///     .write_to(&dir.path().join("course.zip"));
/// ```
pub struct ArchiveBuilder {
    items: Vec<Item>,
    default_modified: DateTime,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    /// Entries added with [`file`](Self::file) get 2024-01-15 10:00:00.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            default_modified: stamp(2024, 1, 15, 10, 0, 0),
        }
    }

    pub fn file(self, name: &str, content: &[u8]) -> Self {
        let modified = self.default_modified;
        self.file_at(name, content, modified)
    }

    pub fn file_at(mut self, name: &str, content: &[u8], modified: DateTime) -> Self {
        self.items.push(Item::File {
            name: name.to_string(),
            content: content.to_vec(),
            modified,
        });
        self
    }

    pub fn directory(mut self, name: &str) -> Self {
        self.items.push(Item::Directory {
            name: name.to_string(),
        });
        self
    }

    /// Write the archive, creating parent directories.
    ///
    /// # Panics
    /// Panics on any I/O or zip error.
    pub fn write_to(self, path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for item in self.items {
            match item {
                Item::File {
                    name,
                    content,
                    modified,
                } => {
                    let options = SimpleFileOptions::default()
                        .compression_method(CompressionMethod::Deflated)
                        .last_modified_time(modified);
                    writer.start_file(name, options).unwrap();
                    writer.write_all(&content).unwrap();
                }
                Item::Directory { name } => {
                    writer
                        .add_directory(name, SimpleFileOptions::default())
                        .unwrap();
                }
            }
        }
        writer.finish().unwrap();
    }
}
