//! Tests for archive path normalization and filename sanitizing

use lms_fs::{ArchivePath, sanitize_filename};
use rstest::rstest;

#[rstest]
#[case("Lecture/slides.pdf", &["Lecture", "slides.pdf"])]
// Backslashes from archives written on Windows
#[case("Lecture\\Week 1\\slides.pdf", &["Lecture", "Week 1", "slides.pdf"])]
// Leading slashes are stripped
#[case("/Lecture/slides.pdf", &["Lecture", "slides.pdf"])]
#[case("//Lecture//slides.pdf", &["Lecture", "slides.pdf"])]
// Dot segments are dropped
#[case("./Lecture/./slides.pdf", &["Lecture", "slides.pdf"])]
#[case("index.html", &["index.html"])]
fn test_archive_path_segments(#[case] raw: &str, #[case] expected: &[&str]) {
    let path = ArchivePath::new(raw);
    assert_eq!(path.segments(), expected);
    assert!(!path.has_traversal());
}

#[test]
fn test_archive_path_category_and_entry() {
    let path = ArchivePath::new("Exercise/Sheet 1/solution.pdf");
    assert_eq!(path.category(), Some("Exercise"));
    assert_eq!(path.entry(), Some("Sheet 1"));
    assert_eq!(path.file_name(), Some("solution.pdf"));
    assert_eq!(path.as_string(), "Exercise/Sheet 1/solution.pdf");
}

#[test]
fn test_archive_path_directory_entry() {
    let path = ArchivePath::new("Exercise/Sheet 1/");
    assert!(path.is_dir());
    assert_eq!(path.len(), 2);
}

#[test]
fn test_archive_path_reports_traversal() {
    let path = ArchivePath::new("Lecture/../../etc/passwd");
    assert!(path.has_traversal());
}

#[rstest]
#[case("Übungen", "Übungen")]
#[case("  Lecture  ", "Lecture")]
#[case("Exercise/Solutions", "ExerciseSolutions")]
#[case("What? Why*", "What_ Why")]
#[case("a<b>c:d\"e|f", "abcdef")]
#[case("tab\there", "tabhere")]
#[case("", "unnamed")]
#[case("///", "unnamed")]
fn test_sanitize_filename(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize_filename(input, false), expected);
}

#[test]
fn test_sanitize_filename_keeps_separators_when_allowed() {
    assert_eq!(sanitize_filename("a/b\\c", true), "a/b\\c");
}
