//! Tests for the command handlers.

use serde_json::Value;
use std::path::PathBuf;
use storyloom::cli::{
    ValidationOutputFormat, ValidationStatus, handle_delete_scene_command, handle_export_command,
    handle_graph_command, handle_rename_command, handle_validate_command,
};
use storyloom::{ConfirmPrompt, StoryloomConfig, StoryloomErrorKind};

const STORY: &str = r#"{
  "config": {
    "title": "Test"
  },
  "start": {
    "description": "Begin",
    "choices": [
      {
        "text": "Go",
        "next_scene": "end"
      },
      {
        "text": "Peek",
        "next_scene": "attic"
      }
    ]
  },
  "end": {
    "description": "Fin",
    "choices": []
  }
}"#;

fn write_fixture(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("story.json");
    std::fs::write(&path, contents).unwrap();
    path
}

fn run_validate(contents: &str, format: ValidationOutputFormat, strict: bool) -> (ValidationStatus, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, contents);
    let mut out = Vec::new();
    let status =
        handle_validate_command(&path, &StoryloomConfig::default(), format, strict, &mut out)
            .unwrap();
    (status, String::from_utf8(out).unwrap())
}

#[test]
fn test_validate_reports_dangling_reference() {
    let (status, output) = run_validate(STORY, ValidationOutputFormat::Human, false);
    assert_eq!(status, ValidationStatus::Invalid);
    assert_eq!(status.exit_code(), 1);
    assert!(output.contains("Errors:"));
    assert!(output.contains("attic"));
}

#[test]
fn test_validate_json_output() {
    let (_, output) = run_validate(STORY, ValidationOutputFormat::Json, false);
    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["kind"], "dangling_reference");
    assert_eq!(json["errors"][0]["location"]["scene"], "start");
}

#[test]
fn test_validate_strict_mode_fails_on_warnings() {
    let story = r#"{"start": {"description": "a", "choices": []}, "island": {"description": "b", "choices": []}}"#;

    let (status, output) = run_validate(story, ValidationOutputFormat::Human, false);
    assert_eq!(status, ValidationStatus::Valid);
    assert!(output.contains("Warnings:"));

    let (status, _) = run_validate(story, ValidationOutputFormat::Human, true);
    assert_eq!(status, ValidationStatus::Warnings);
    assert_eq!(status.exit_code(), 2);
}

#[test]
fn test_validate_clean_story() {
    let story = r#"{"start": {"description": "a", "choices": [{"text": "Go", "next_scene": "end"}]}, "end": {"description": "b", "choices": []}}"#;
    let (status, output) = run_validate(story, ValidationOutputFormat::Human, true);
    assert_eq!(status, ValidationStatus::Valid);
    assert!(output.contains("No issues found"));
}

#[test]
fn test_validate_rejects_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, r#"{"config": {}}"#);
    let err = handle_validate_command(
        &path,
        &StoryloomConfig::default(),
        ValidationOutputFormat::Human,
        false,
        &mut Vec::new(),
    )
    .unwrap_err();

    match err.kind() {
        StoryloomErrorKind::Story(e) => assert!(e.is_format()),
        other => panic!("Expected story error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = handle_export_command(&dir.path().join("absent.json"), None, &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err.kind(), StoryloomErrorKind::Io(_)));
}

#[test]
fn test_graph_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, STORY);
    let mut out = Vec::new();
    handle_graph_command(&path, &StoryloomConfig::default(), &mut out).unwrap();

    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["nodes"][0]["id"], "attic");
    assert_eq!(json["nodes"][0]["invalid"], true);
    assert_eq!(json["nodes"][1]["isStart"], true);
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn test_export_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, STORY);
    let mut out = Vec::new();
    handle_export_command(&path, None, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", STORY));
}

#[test]
fn test_rename_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, STORY);
    let output = dir.path().join("renamed.json");

    handle_rename_command(
        &path,
        "end",
        "finale",
        Some(&output),
        &StoryloomConfig::default(),
        &mut Vec::new(),
    )
    .unwrap();

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json.get("end").is_none());
    assert_eq!(json["start"]["choices"][0]["next_scene"], "finale");
    assert_eq!(json["config"]["title"], "Test");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), STORY);
}

#[test]
fn test_rename_missing_scene_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, STORY);
    let err = handle_rename_command(
        &path,
        "nowhere",
        "x",
        None,
        &StoryloomConfig::default(),
        &mut Vec::new(),
    )
    .unwrap_err();

    match err.kind() {
        StoryloomErrorKind::Story(e) => assert!(e.is_invalid_argument()),
        other => panic!("Expected story error, got {:?}", other),
    }
}

#[test]
fn test_delete_scene_declined_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, STORY);
    let mut out = Vec::new();

    let deleted = handle_delete_scene_command(
        &path,
        "end",
        None,
        &StoryloomConfig::default(),
        &mut |_: &ConfirmPrompt| false,
        &mut out,
    )
    .unwrap();

    assert!(!deleted);
    assert!(out.is_empty());
}

#[test]
fn test_delete_scene_confirmed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, STORY);
    let mut out = Vec::new();

    let deleted = handle_delete_scene_command(
        &path,
        "end",
        None,
        &StoryloomConfig::default(),
        &mut |_: &ConfirmPrompt| true,
        &mut out,
    )
    .unwrap();

    assert!(deleted);
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert!(json.get("end").is_none());
    assert_eq!(json["start"]["choices"].as_array().unwrap().len(), 1);
    assert_eq!(json["start"]["choices"][0]["text"], "Peek");
}
