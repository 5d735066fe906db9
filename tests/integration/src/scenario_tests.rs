//! End-to-end scenarios
//!
//! Each test drives a full run: a configuration file on disk, a mirrored
//! site standing in for the remote collaborator, the batch runner, and the
//! resulting destination tree and summary reports.

use std::fs;
use std::path::PathBuf;

use lms_core::{
    BatchReport, BatchRunner, Config, ConfigDefaults, CourseOutcome, MirrorSession,
    SummaryRecorder, SummaryStatus, SummaryStore,
};
use lms_test_utils::{ArchiveBuilder, TestTree, stamp};
use pretty_assertions::assert_eq;
use serde_json::json;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A workspace holding a config file, a mirrored site and the output tree.
struct Scenario {
    tree: TestTree,
}

impl Scenario {
    fn new(config_yaml: &str) -> Self {
        let tree = TestTree::new();
        let yaml = config_yaml
            .replace("{out}", &tree.path("out").display().to_string())
            .replace("{cache}", &tree.path("cache").display().to_string())
            .replace("{summaries}", &tree.path("summaries").display().to_string());
        tree.write("config.yaml", yaml.as_bytes());
        tree.write_json(
            "site/courses.json",
            &json!([
                { "id": "ana", "title": "Analysis für Informatik", "is_winter": true, "start_year": 2023 },
                { "id": "la", "title": "Lineare Algebra", "is_winter": true, "start_year": 2023 }
            ]),
        );
        Self { tree }
    }

    fn course(&self, id: &str, catalog: serde_json::Value, archive: ArchiveBuilder) {
        self.tree.write_json(&format!("site/{id}/catalog.json"), &catalog);
        archive.write_to(&self.tree.path(&format!("site/{id}/archive.zip")));
    }

    fn config(&self) -> Config {
        let defaults = ConfigDefaults::for_home(self.tree.root());
        Config::load(&self.tree.path("config.yaml"), &defaults).unwrap()
    }

    fn run(&self) -> (BatchReport, SummaryRecorder) {
        let config = self.config();
        let session = MirrorSession::new(self.tree.path("site"));
        let mut recorder = SummaryRecorder::new();
        let report = BatchRunner::new(&config)
            .run(&session, Some(&mut recorder))
            .unwrap();
        (report, recorder)
    }

    fn out(&self, rel: &str) -> PathBuf {
        self.tree.path(&format!("out/{rel}"))
    }
}

fn lecture_catalog() -> serde_json::Value {
    json!({ "categories": [
        { "title": "Lecture", "entries": [ { "id": "1", "title": "1_slides" } ] },
        { "title": "Exercise", "entries": [ { "id": "2", "title": "1_sheet" } ] }
    ]})
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_category_auto_run_then_idempotent_rerun() {
    let scenario = Scenario::new(
        r#"
destination_base: "{out}"
cache_dir: "{cache}"
courses:
  - pattern: "Analysis"
    match_type: contains
    semester: "WS23/24"
    destination_base: "ana"
"#,
    );
    scenario.course(
        "ana",
        lecture_catalog(),
        ArchiveBuilder::new()
            .file("Lecture/1_slides.pdf", b"slides")
            .file("Exercise/1_sheet.pdf", b"sheet"),
    );

    let (report, recorder) = scenario.run();
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.materialized(), 2);
    assert_eq!(
        recorder
            .records()
            .iter()
            .map(|r| (r.stored_path.clone(), r.status))
            .collect::<Vec<_>>(),
        vec![
            (scenario.out("ana/Lecture/1_slides.pdf"), SummaryStatus::Added),
            (scenario.out("ana/Exercise/1_sheet.pdf"), SummaryStatus::Added),
        ]
    );

    let (second, recorder) = scenario.run();
    assert_eq!(second.materialized(), 0);
    assert!(recorder.is_empty());
    assert_eq!(recorder.render(), "Total updated files: 0. No files were updated.");
}

#[test]
fn test_rename_history_across_runs() {
    let scenario = Scenario::new(
        r#"
destination_base: "{out}"
cache_dir: "{cache}"
update: rename
courses:
  - pattern: "Lineare Algebra"
    match_type: literal
    semester: "WiSe 2023/24"
    config_type: entry_auto
"#,
    );

    let catalog = json!({ "categories": [
        { "title": "Material", "entries": [ { "id": "1", "title": "report" } ] }
    ]});
    for (content, month) in [(b"v1", 1u8), (b"v2", 2), (b"v3", 3)] {
        scenario.course(
            "la",
            catalog.clone(),
            ArchiveBuilder::new().file_at("Material/report.pdf", content, stamp(2024, month, 1, 9, 0, 0)),
        );
        scenario.run();
    }

    let dir = scenario.out("Lineare Algebra");
    assert_eq!(fs::read(dir.join("report.pdf")).unwrap(), b"v1");
    assert_eq!(fs::read(dir.join("report_1.pdf")).unwrap(), b"v2");
    assert_eq!(fs::read(dir.join("report_2.pdf")).unwrap(), b"v3");
}

#[test]
fn test_manual_rules_with_file_override_and_summary_report() {
    let scenario = Scenario::new(
        r#"
destination_base: "{out}"
cache_dir: "{cache}"
summary:
  enabled: true
  path: "{summaries}"
  expire_days: 7
ignored_files:
  - pattern: "Thumbs.db"
    match_type: literal
courses:
  - pattern: "Analysis"
    match_type: contains
    semester: "WS2023"
    destination_base: "ana"
    config_type: category_manual
    config:
      rules:
        categories:
          - pattern: "Übung"
            match_type: contains
            destination: "exercises"
        entries:
          - pattern: "Blatt 1"
            match_type: literal
            directory: "first"
            update: overwrite
          - pattern: "^Blatt"
            match_type: regex
            directory: "sheets"
          - pattern: "Aufzeichnung"
            match_type: contains
            ignore: true
        files:
          - pattern: "\\.srt$"
            match_type: regex
            ignore: true
"#,
    );
    scenario.course(
        "ana",
        json!({ "categories": [
            { "title": "Übungen", "entries": [
                { "id": "1", "title": "Blatt 1" },
                { "id": "2", "title": "Blatt 2" },
                { "id": "3", "title": "Aufzeichnung 1" },
                { "id": "4", "title": "Hinweise" }
            ]},
            { "title": "Vorlesung", "entries": [ { "id": "5", "title": "Folien" } ] }
        ]}),
        ArchiveBuilder::new()
            .file("Übungen/Blatt 1/blatt1.pdf", b"b1")
            .file("Übungen/Blatt 2/blatt2.pdf", b"b2")
            .file("Übungen/Blatt 2/Thumbs.db", b"junk")
            .file("Übungen/Aufzeichnung 1/video.mp4", b"video")
            .file("Übungen/Aufzeichnung 1/video.srt", b"subs")
            .file("Übungen/Hinweise.pdf", b"hints")
            .file("Vorlesung/Folien/folien.pdf", b"slides"),
    );

    let (report, recorder) = scenario.run();
    let course = &report.courses[0];
    match &course.outcome {
        CourseOutcome::Synced(sync) => {
            assert_eq!(sync.materialized, 3);
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    let tree = &scenario.tree;
    assert_eq!(tree.read("out/ana/exercises/first/Blatt 1/blatt1.pdf"), "b1");
    assert_eq!(tree.read("out/ana/exercises/sheets/Blatt 2/blatt2.pdf"), "b2");
    assert_eq!(tree.read("out/ana/exercises/Hinweise.pdf"), "hints");
    tree.assert_not_exists("out/ana/exercises/sheets/Blatt 2/Thumbs.db");
    tree.assert_not_exists("out/ana/exercises/Aufzeichnung 1");
    tree.assert_not_exists("out/ana/Vorlesung");

    let config = scenario.config();
    let summary = &config.settings.summary;
    let store = SummaryStore::new(&summary.dir, summary.expire_days);
    let saved = store.persist(&recorder).unwrap();
    let csv = fs::read_to_string(saved).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("\"Blatt 1\",\"blatt1.pdf\",\"added\""));
}
