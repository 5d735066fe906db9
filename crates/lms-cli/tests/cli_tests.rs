//! Integration tests that invoke the compiled `lms-sync` binary.

use assert_cmd::Command;
use lms_test_utils::{ArchiveBuilder, TestTree};
use predicates::prelude::*;
use serde_json::json;

/// Get a Command for the lms-sync binary
fn lms_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lms-sync"));
    cmd.env_remove("RUST_LOG").env_remove("LMS_SYNC_CONFIG");
    cmd
}

fn write_config(tree: &TestTree, extra: serde_json::Value) -> std::path::PathBuf {
    let mut doc = json!({
        "destination_base": tree.path("out"),
        "cache_dir": tree.path("cache"),
        "summary": { "enabled": true, "path": tree.path("summaries"), "expire_days": 7 },
        "courses": [
            { "pattern": "Analysis", "match_type": "contains", "semester": "WS23/24",
              "destination_base": "analysis",
              "config": { "rules": { "files": [
                  { "pattern": "\\.srt$", "match_type": "regex", "ignore": true }
              ] } } }
        ]
    });
    if let (Some(doc), Some(extra)) = (doc.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            doc.insert(key.clone(), value.clone());
        }
    }
    tree.write_json("config.json", &doc)
}

fn write_mirror(tree: &TestTree) {
    tree.write_json(
        "site/courses.json",
        &json!([ { "id": "1", "title": "Analysis 1", "is_winter": true, "start_year": 2023 } ]),
    );
    tree.write_json(
        "site/1/catalog.json",
        &json!({ "categories": [
            { "title": "Lecture", "entries": [ { "id": "a", "title": "Week 1" } ] }
        ]}),
    );
    ArchiveBuilder::new()
        .file("Lecture/Week 1/slides.pdf", b"slides")
        .file("Lecture/Week 1/slides.srt", b"subtitles")
        .write_to(&tree.path("site/1/archive.zip"));
}

#[test]
fn test_help_lists_commands() {
    lms_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("extract"));
}

#[test]
fn test_check_valid_config() {
    let tree = TestTree::new();
    let config = write_config(&tree, json!({}));

    lms_cmd()
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("contains:Analysis"))
        .stdout(predicate::str::contains("WS2023/2024"))
        .stdout(predicate::str::contains("1 course config(s) valid"));
}

#[test]
fn test_check_reports_invalid_config() {
    let tree = TestTree::new();
    let config = write_config(&tree, json!({ "update": "replace" }));

    lms_cmd()
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("document.update"));
}

#[test]
fn test_check_missing_file() {
    let tree = TestTree::new();
    lms_cmd()
        .args(["check", "--config"])
        .arg(tree.path("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_sync_from_mirror() {
    let tree = TestTree::new();
    let config = write_config(&tree, json!({}));
    write_mirror(&tree);

    lms_cmd()
        .args(["sync", "--config"])
        .arg(&config)
        .arg("--mirror")
        .arg(tree.path("site"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total updated files: 1."))
        .stdout(predicate::str::contains("[added]"))
        .stdout(predicate::str::contains("Summary file has been saved to"));

    assert_eq!(tree.read("out/analysis/Lecture/Week 1/slides.pdf"), "slides");
    tree.assert_not_exists("out/analysis/Lecture/Week 1/slides.srt");

    // Nothing changes on a second run
    lms_cmd()
        .args(["sync", "--config"])
        .arg(&config)
        .arg("--mirror")
        .arg(tree.path("site"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No files were updated."));
}

#[test]
fn test_extract_local_archive() {
    let tree = TestTree::new();
    let config = write_config(&tree, json!({ "summary": { "enabled": false } }));
    write_mirror(&tree);

    lms_cmd()
        .args(["extract", "--config"])
        .arg(&config)
        .args(["--course", "0", "--catalog"])
        .arg(tree.path("site/1/catalog.json"))
        .arg("--archive")
        .arg(tree.path("site/1/archive.zip"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 written, 1 skipped"));

    tree.assert_exists("out/analysis/Lecture/Week 1/slides.pdf");
    tree.assert_not_exists("summaries");
}

#[test]
fn test_extract_unknown_course_index() {
    let tree = TestTree::new();
    let config = write_config(&tree, json!({}));

    lms_cmd()
        .args(["extract", "--config"])
        .arg(&config)
        .args(["--course", "5", "--catalog", "c.json", "--archive", "a.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no course config at index 5"));
}

#[test]
fn test_clean_summaries() {
    let tree = TestTree::new();
    let config = write_config(&tree, json!({}));
    tree.write("summaries/lms_sync_summary_20200101_000000.csv", b"old");
    tree.set_mtime(
        "summaries/lms_sync_summary_20200101_000000.csv",
        std::time::SystemTime::now() - std::time::Duration::from_secs(30 * 86_400),
    );

    lms_cmd()
        .args(["clean-summaries", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 expired summary file(s)"));

    tree.assert_not_exists("summaries/lms_sync_summary_20200101_000000.csv");
}
