//! Remote course and catalog descriptions
//!
//! These are produced by a [`CourseSession`](crate::session::CourseSession)
//! and only read by the rule compiler.

use serde::{Deserialize, Serialize};

use crate::config::Semester;

/// A course as listed by the remote site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Opaque remote identifier
    pub id: String,
    pub title: String,
    /// Free-form text the semester was parsed from
    #[serde(default)]
    pub metainfo: String,
    pub is_winter: bool,
    pub start_year: i32,
    /// Hidden from the user's course overview on the remote site
    #[serde(default)]
    pub hidden: bool,
}

impl CourseInfo {
    pub fn new(id: impl Into<String>, title: impl Into<String>, semester: Semester) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            metainfo: semester.to_string(),
            is_winter: semester.is_winter,
            start_year: semester.start_year,
            hidden: false,
        }
    }

    pub fn semester(&self) -> Semester {
        Semester::new(self.is_winter, self.start_year)
    }
}

/// A downloadable resource inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Opaque remote identifier
    pub id: String,
    pub title: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A remote grouping of entries, e.g. a course section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

impl CatalogCategory {
    pub fn new(title: impl Into<String>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }
}

/// Ordered list of categories offered for one course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCatalog {
    #[serde(default)]
    pub categories: Vec<CatalogCategory>,
}

impl RemoteCatalog {
    pub fn new(categories: Vec<CatalogCategory>) -> Self {
        Self { categories }
    }

    /// Total number of entries across all categories.
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
