//! Archive path normalization and filename helpers

use std::path::{Path, PathBuf};

/// A path inside a course archive, normalized to forward slashes.
///
/// Archives produced on different platforms mix separators and sometimes
/// carry a leading slash. `ArchivePath` stores the cleaned segments so the
/// synchronizer can reason about the `category/entry[/...]` layout without
/// re-parsing strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchivePath {
    /// Cleaned path segments, never empty strings or `.`
    segments: Vec<String>,
    /// Whether the raw name denoted a directory (trailing separator)
    is_dir: bool,
    /// Whether any `..` segment was present in the raw name
    traversal: bool,
}

impl ArchivePath {
    /// Normalize a raw archive entry name.
    ///
    /// Converts backslashes to forward slashes, strips leading slashes and
    /// drops empty and `.` segments. `..` segments are kept so that
    /// [`has_traversal`](Self::has_traversal) can report them.
    pub fn new(raw: &str) -> Self {
        let normalized = raw.replace('\\', "/");
        let is_dir = normalized.ends_with('/');
        let mut traversal = false;
        let segments = normalized
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .map(|s| {
                if s == ".." {
                    traversal = true;
                }
                s.to_string()
            })
            .collect();

        Self {
            segments,
            is_dir,
            traversal,
        }
    }

    /// The normalized segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the raw name had a trailing separator.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Whether the raw name contained a `..` segment.
    pub fn has_traversal(&self) -> bool {
        self.traversal
    }

    /// First segment (the remote category), if any.
    pub fn category(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Second segment (the remote entry), if any.
    pub fn entry(&self) -> Option<&str> {
        self.segments.get(1).map(String::as_str)
    }

    /// Last segment.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Everything after the first segment as a relative native path.
    pub fn after_category(&self) -> PathBuf {
        self.segments.iter().skip(1).collect()
    }

    /// The normalized string form, segments joined by `/`.
    pub fn as_string(&self) -> String {
        self.segments.join("/")
    }
}

impl std::fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for ArchivePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Split a file name into stem and suffix (suffix includes the dot).
///
/// A leading dot does not start a suffix, so `.bashrc` has no suffix and
/// `archive.tar.gz` splits into `archive.tar` and `.gz`.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Make a remote title safe for use as a file or directory name.
///
/// Removes control characters and the characters `< > : " | *`, replaces
/// `?` with `_`, trims surrounding whitespace and, unless
/// `allow_separators` is set, removes path separators.
pub fn sanitize_filename(name: &str, allow_separators: bool) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_ascii_control())
        .filter(|c| allow_separators || (*c != '/' && *c != '\\'))
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '|' | '*'))
        .map(|c| if c == '?' { '_' } else { c })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("report.pdf"), ("report", ".pdf"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension("trailing."), ("trailing.", ""));
    }

    #[test]
    fn test_after_category() {
        let path = ArchivePath::new("Lecture/Week 1/slides.pdf");
        assert_eq!(path.after_category(), PathBuf::from("Week 1").join("slides.pdf"));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/out"), PathBuf::from("/tmp/out"));
        assert_eq!(expand_home("relative/dir"), PathBuf::from("relative/dir"));
    }
}
