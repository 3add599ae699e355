//! Tests for TOML configuration loading.

use std::io::Write;
use storyloom_editor::{NEW_CHOICE_TEXT, StoryloomConfig};
use storyloom_graph::{EdgeDedup, INVALID_SCENE_NOTICE};

#[test]
fn test_empty_config_uses_defaults() {
    let config = StoryloomConfig::from_toml_str("").unwrap();
    assert_eq!(config, StoryloomConfig::default());

    assert_eq!(config.editor.new_choice_text, NEW_CHOICE_TEXT);
    assert_eq!(config.editor.default_color, "white");
    assert_eq!(*config.editor.combat_defaults.health(), 50);
    assert_eq!(*config.editor.combat_defaults.attack(), 10);
    assert_eq!(*config.editor.combat_defaults.defense(), 5);
    assert_eq!(*config.editor.requires_vote_defaults.min_players(), 2);
    assert_eq!(*config.editor.requires_vote_defaults.timeout(), 2);
    assert_eq!(config.projection.start_scene(), "start");
    assert_eq!(*config.projection.edge_dedup(), EdgeDedup::Unordered);
    assert_eq!(config.projection.invalid_scene_notice(), INVALID_SCENE_NOTICE);
    assert!(*config.lint.warn_unreachable());
}

#[test]
fn test_partial_sections() {
    let config = StoryloomConfig::from_toml_str(
        r#"
        [editor]
        default_color = "cyan"

        [editor.combat_defaults]
        health = 80

        [lint]
        warn_unknown_colors = false
        "#,
    )
    .unwrap();

    assert_eq!(config.editor.default_color, "cyan");
    assert_eq!(config.editor.new_choice_text, NEW_CHOICE_TEXT);
    assert_eq!(*config.editor.combat_defaults.health(), 80);
    assert_eq!(*config.editor.combat_defaults.attack(), 10);
    assert!(!config.lint.warn_unknown_colors());
    assert!(*config.lint.warn_unreachable());

    let defaults = config.editor.edit_defaults();
    assert_eq!(*defaults.combat().health(), 80);
    assert_eq!(*defaults.requires_vote().timeout(), 2);
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let err = StoryloomConfig::from_toml_str("[projection]\nedge_dedup = \"sideways\"").unwrap_err();
    assert!(err.message.contains("Invalid TOML"));
    assert!(err.to_string().starts_with("Configuration Error:"));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[projection]\nstart_scene = \"prologue\"").unwrap();

    let config = StoryloomConfig::from_file(file.path()).unwrap();
    assert_eq!(config.projection.start_scene(), "prologue");
}

#[test]
fn test_missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = StoryloomConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}
