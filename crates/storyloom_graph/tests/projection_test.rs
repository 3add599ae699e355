//! Tests for graph projection.

use serde_json::json;
use storyloom_core::{ChoiceKind, Story};
use storyloom_graph::{
    EdgeDedup, INVALID_SCENE_NOTICE, NO_CHOICE_TEXT, ProjectionConfig, project,
    project_with_config, start_scene_id, validate,
};

fn story(value: serde_json::Value) -> Story {
    Story::from_value(value).expect("valid story")
}

#[test]
fn test_basic_projection() {
    let story = story(json!({
        "start": {"choices": [{"text": "Go", "next_scene": "end"}]},
        "end": {"choices": []}
    }));
    let projection = project(&story, &validate(&story));

    assert_eq!(
        serde_json::to_value(&projection).unwrap(),
        json!({
            "nodes": [
                {"id": "start", "invalid": false, "isStart": true},
                {"id": "end", "invalid": false}
            ],
            "edges": [
                {"source": "start", "target": "end", "kind": "basic", "invalid": false}
            ]
        })
    );
}

#[test]
fn test_combat_targets_become_invalid_nodes() {
    let story = story(json!({
        "start": {"choices": [{
            "text": "Fight",
            "combat": {"health": 50, "attack": 10, "defense": 5},
            "success": "win",
            "failure": "lose"
        }]}
    }));
    let projection = project(&story, &validate(&story));

    let ids: Vec<_> = projection.nodes().iter().map(|n| n.id().as_str()).collect();
    assert_eq!(ids, vec!["win", "lose", "start"]);
    assert!(*projection.node("win").unwrap().invalid());
    assert!(*projection.node("lose").unwrap().invalid());

    assert_eq!(projection.edges().len(), 2);
    for edge in projection.edges() {
        assert_eq!(*edge.kind(), ChoiceKind::Combat);
        assert!(*edge.invalid());
    }

    let summary = projection.summary("win").unwrap();
    assert_eq!(summary.description_text(), INVALID_SCENE_NOTICE);
    assert!(summary.choices().is_empty());
}

#[test]
fn test_unordered_dedup_keeps_first_edge() {
    let story = story(json!({
        "start": {"choices": [
            {"text": "Walk", "next_scene": "hall"},
            {"text": "Run", "next_scene": "hall"}
        ]},
        "hall": {"choices": [
            {"text": "Back", "next_scene": "start"},
            {"text": "Vote", "voting_system": {
                "type": "majority",
                "options": [{"text": "Go", "scene": "vault"}],
                "tie_breaker": "random"
            }}
        ]},
        "vault": {"choices": []}
    }));
    let projection = project(&story, &validate(&story));

    let pairs: Vec<_> = projection
        .edges()
        .iter()
        .map(|e| (e.source().as_str(), e.target().as_str(), *e.kind()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("start", "hall", ChoiceKind::Basic),
            ("hall", "vault", ChoiceKind::Voting),
        ]
    );
}

#[test]
fn test_directed_dedup_keeps_both_directions() {
    let story = story(json!({
        "start": {"choices": [{"text": "In", "next_scene": "hall"}]},
        "hall": {"choices": [{"text": "Out", "next_scene": "start"}]}
    }));
    let config = ProjectionConfig::default().with_edge_dedup(EdgeDedup::Directed);
    let projection = project_with_config(&story, &validate(&story), &config);

    assert_eq!(projection.edges().len(), 2);
    assert_eq!(projection.edges_from("hall").count(), 1);
}

#[test]
fn test_success_without_combat_draws_no_edge_but_is_still_invalid() {
    let story = story(json!({
        "start": {"choices": [{"text": "Run", "success": "away", "next_scene": "start"}]}
    }));
    let report = validate(&story);
    assert_eq!(report.invalid_ids(), ["away"]);

    let projection = project(&story, &report);
    assert!(*projection.node("away").unwrap().invalid());
    assert!(projection.edges().iter().all(|e| e.target() != "away"));
    assert_eq!(projection.edges().len(), 1);
}

#[test]
fn test_requires_vote_edges() {
    let story = story(json!({
        "start": {"choices": [{
            "text": "Gate",
            "requires_vote": {"min_players": 2, "timeout": 2, "success_scene": "open", "failure_scene": "closed"}
        }]},
        "open": {},
        "closed": {}
    }));
    let projection = project(&story, &validate(&story));

    assert_eq!(projection.edges().len(), 2);
    assert!(
        projection
            .edges()
            .iter()
            .all(|e| *e.kind() == ChoiceKind::RequiresVote && !e.invalid())
    );
}

#[test]
fn test_multi_variant_choice_is_walked_completely() {
    let story = story(json!({
        "start": {"choices": [{
            "text": "Confused",
            "next_scene": "a",
            "voting_system": {"type": "majority", "options": [{"text": "b", "scene": "b"}], "tie_breaker": "random"}
        }]},
        "a": {},
        "b": {}
    }));
    let projection = project(&story, &validate(&story));

    let kinds: Vec<_> = projection.edges().iter().map(|e| *e.kind()).collect();
    assert_eq!(kinds, vec![ChoiceKind::Basic, ChoiceKind::Voting]);
}

#[test]
fn test_start_falls_back_to_first_scene() {
    let story = story(json!({"config": {}, "intro": {}, "outro": {}}));
    assert_eq!(start_scene_id(&story, "start"), Some("intro"));

    let projection = project(&story, &validate(&story));
    assert_eq!(projection.start_node().unwrap().id(), "intro");
    assert_eq!(projection.nodes().iter().filter(|n| *n.is_start()).count(), 1);
}

#[test]
fn test_configured_start_scene() {
    let story = story(json!({"intro": {}, "prologue": {}}));
    let config = ProjectionConfig::default().with_start_scene("prologue");
    let projection = project_with_config(&story, &validate(&story), &config);
    assert_eq!(projection.start_node().unwrap().id(), "prologue");
}

#[test]
fn test_summaries() {
    let story = story(json!({
        "start": {
            "description": {"text": "Dark.", "color": "red"},
            "choices": [{"text": "Light a torch", "next_scene": "start"}, {"next_scene": "start"}]
        },
        "bare": {"description": "Plain text."}
    }));
    let projection = project(&story, &validate(&story));

    let start = projection.summary("start").unwrap();
    assert_eq!(start.title(), "start");
    assert_eq!(start.description_text(), "Dark.");
    assert_eq!(start.choices(), &vec!["Light a torch".to_string(), NO_CHOICE_TEXT.to_string()]);
    assert!(!start.invalid());

    let bare = projection.summary("bare").unwrap();
    assert_eq!(bare.description_text(), "Plain text.");
    assert!(bare.choices().is_empty());
}

#[test]
fn test_projection_config_from_toml() {
    let config: ProjectionConfig = toml::from_str(
        r#"
        start_scene = "prologue"
        edge_dedup = "directed"
        "#,
    )
    .unwrap();

    assert_eq!(config.start_scene(), "prologue");
    assert_eq!(*config.edge_dedup(), EdgeDedup::Directed);
    assert_eq!(config.invalid_scene_notice(), INVALID_SCENE_NOTICE);
}
