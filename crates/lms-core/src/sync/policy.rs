//! Destination conflict handling

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use lms_fs::split_extension;

use crate::Result;

/// Newest modification time among `dest` and its `stem_<n>.ext` rename
/// siblings, or `None` when `dest` does not exist.
pub(crate) fn newest_local_mtime(dest: &Path) -> Result<Option<SystemTime>> {
    let Some(mut newest) = lms_fs::io::modified_time(dest)? else {
        return Ok(None);
    };

    let (Some(parent), Some(name)) = (dest.parent(), dest.file_name()) else {
        return Ok(Some(newest));
    };
    let name = name.to_string_lossy();
    let (stem, suffix) = split_extension(&name);

    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(_) => return Ok(Some(newest)),
    };
    for entry in entries.flatten() {
        let sibling = entry.file_name();
        if !is_rename_sibling(&sibling.to_string_lossy(), stem, suffix) {
            continue;
        }
        if let Some(modified) = lms_fs::io::modified_time(&entry.path())? {
            newest = newest.max(modified);
        }
    }
    Ok(Some(newest))
}

/// Whether `name` is `{stem}_<digits>{suffix}`.
pub(crate) fn is_rename_sibling(name: &str, stem: &str, suffix: &str) -> bool {
    name.strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(suffix))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// First unused `stem_<n>.ext` next to `dest`, probing from `n = 1`.
pub(crate) fn next_free_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, suffix) = split_extension(&name);

    (1u32..)
        .map(|n| dest.with_file_name(format!("{stem}_{n}{suffix}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_rename_sibling() {
        assert!(is_rename_sibling("report_1.pdf", "report", ".pdf"));
        assert!(is_rename_sibling("report_12.pdf", "report", ".pdf"));
        assert!(!is_rename_sibling("report_.pdf", "report", ".pdf"));
        assert!(!is_rename_sibling("report_a.pdf", "report", ".pdf"));
        assert!(!is_rename_sibling("report_1.txt", "report", ".pdf"));
        assert!(!is_rename_sibling("report.pdf", "report", ".pdf"));
    }

    #[test]
    fn test_next_free_path_skips_taken_names() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("report.pdf");
        fs::write(&dest, b"0").unwrap();
        assert_eq!(next_free_path(&dest), temp.path().join("report_1.pdf"));

        fs::write(temp.path().join("report_1.pdf"), b"1").unwrap();
        assert_eq!(next_free_path(&dest), temp.path().join("report_2.pdf"));
    }

    #[test]
    fn test_newest_local_mtime_missing_destination() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("report_1.pdf"), b"1").unwrap();
        let newest = newest_local_mtime(&temp.path().join("report.pdf")).unwrap();
        assert!(newest.is_none());
    }
}
