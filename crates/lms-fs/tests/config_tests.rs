use lms_fs::{ConfigStore, Error};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_document_json_yaml_toml_agree() {
    let temp = TempDir::new().unwrap();
    let json_path = temp.path().join("config.json");
    let yaml_path = temp.path().join("config.yaml");
    let toml_path = temp.path().join("config.toml");

    fs::write(&json_path, r#"{"destination_base": "/out", "summary": {"expire_days": 3}}"#).unwrap();
    fs::write(&yaml_path, "destination_base: /out\nsummary:\n  expire_days: 3\n").unwrap();
    fs::write(&toml_path, "destination_base = \"/out\"\n[summary]\nexpire_days = 3\n").unwrap();

    let store = ConfigStore::new();
    let expected = json!({"destination_base": "/out", "summary": {"expire_days": 3}});
    assert_eq!(store.load_document(&json_path).unwrap(), expected);
    assert_eq!(store.load_document(&yaml_path).unwrap(), expected);
    assert_eq!(store.load_document(&toml_path).unwrap(), expected);
}

#[test]
fn test_load_document_reports_parse_error_with_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = ConfigStore::new().load_document(&path).unwrap_err();
    match err {
        Error::ConfigParse { format, .. } => assert_eq!(format, "JSON"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_load_document_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.ini");
    fs::write(&path, "a=b").unwrap();

    let err = ConfigStore::new().load_document(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}

#[test]
fn test_load_document_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = ConfigStore::new()
        .load_document(&temp.path().join("absent.yaml"))
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
