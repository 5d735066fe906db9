//! Tests for summary persistence and retention

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use lms_core::{SummaryRecord, SummaryRecorder, SummaryStatus, SummaryStore};
use lms_core::summary::DEFAULT_PREFIX;
use lms_test_utils::TestTree;
use pretty_assertions::assert_eq;

const DAY: Duration = Duration::from_secs(86_400);

fn record(path: &str, detail: &str) -> SummaryRecord {
    SummaryRecord {
        stored_path: PathBuf::from(path),
        course_name: "Analysis".to_string(),
        category_name: "Lecture".to_string(),
        entry_name: "Week 1".to_string(),
        file_name: "slides.pdf".to_string(),
        status: SummaryStatus::Added,
        detail: detail.to_string(),
    }
}

#[test]
fn test_persist_writes_quoted_rows() {
    let tree = TestTree::new();
    let store = SummaryStore::new(tree.path("summaries"), 7);
    let mut recorder = SummaryRecorder::new();
    recorder.add_record(record("/out/Lecture/Week 1/slides.pdf", "a \"quoted\" detail"));

    let path = store.persist(&recorder).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with(DEFAULT_PREFIX));
    assert!(name.ends_with(".csv"));
    // prefix + YYYYmmdd_HHMMSS + .csv
    assert_eq!(name.len(), DEFAULT_PREFIX.len() + 15 + 4);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "\"stored_path\",\"course_name\",\"category_name\",\"entry_name\",\"file_name\",\"status\",\"detail\"",
            "\"/out/Lecture/Week 1/slides.pdf\",\"Analysis\",\"Lecture\",\"Week 1\",\"slides.pdf\",\"added\",\"a \"\"quoted\"\" detail\"",
        ]
    );
}

#[test]
fn test_persist_empty_recorder_writes_header_only() {
    let tree = TestTree::new();
    let store = SummaryStore::new(tree.root(), 7).with_prefix("run_");
    let path = store.persist(&SummaryRecorder::new()).unwrap();

    assert!(path.file_name().unwrap().to_string_lossy().starts_with("run_"));
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
}

#[test]
fn test_sweep_deletes_only_expired_reports() {
    let tree = TestTree::new();
    let now = SystemTime::now();

    tree.write("lms_sync_summary_old.csv", b"old");
    tree.set_mtime("lms_sync_summary_old.csv", now - 10 * DAY);
    tree.write("lms_sync_summary_new.csv", b"new");
    tree.set_mtime("lms_sync_summary_new.csv", now - DAY);
    tree.write("unrelated.csv", b"keep");
    tree.set_mtime("unrelated.csv", now - 30 * DAY);

    let store = SummaryStore::new(tree.root(), 7);
    assert_eq!(store.sweep_expired().unwrap(), 1);

    assert_eq!(
        tree.files(),
        vec!["lms_sync_summary_new.csv", "unrelated.csv"]
    );
}

#[test]
fn test_sweep_missing_directory() {
    let tree = TestTree::new();
    let store = SummaryStore::new(tree.path("nope"), 7);
    assert_eq!(store.sweep_expired().unwrap(), 0);
}
