//! Node/edge projection of a story for rendering.

use crate::ReferenceReport;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use storyloom_core::{ChoiceKind, SceneRef, Story, TargetField};
use tracing::{debug, instrument};

/// Label shown for a choice without text.
pub const NO_CHOICE_TEXT: &str = "No text";

/// Default detail text for synthesized nodes.
pub const INVALID_SCENE_NOTICE: &str =
    "⚠️ Invalid Scene: This scene is referenced but doesn't exist.";

/// How parallel edges between two scenes are collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDedup {
    /// One edge per unordered pair of scenes
    #[default]
    Unordered,
    /// One edge per (source, target) direction
    Directed,
}

/// Projection settings.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default)]
#[setters(prefix = "with_", into)]
pub struct ProjectionConfig {
    /// Scene flagged as the start when present
    start_scene: String,
    /// Edge collapsing rule
    edge_dedup: EdgeDedup,
    /// Detail text for synthesized invalid nodes
    invalid_scene_notice: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            start_scene: "start".to_string(),
            edge_dedup: EdgeDedup::default(),
            invalid_scene_notice: INVALID_SCENE_NOTICE.to_string(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node of the projected graph.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    derive_getters::Getters,
    derive_new::new,
)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionNode {
    /// Scene id, or the missing id for a synthesized node
    id: String,
    /// True for synthesized nodes standing in for missing scenes
    invalid: bool,
    /// True for the single start scene
    #[serde(skip_serializing_if = "is_false")]
    is_start: bool,
}

/// A directed edge of the projected graph.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct ProjectionEdge {
    /// Scene holding the choice
    source: String,
    /// Referenced scene id
    target: String,
    /// Variant the first matching reference belongs to
    kind: ChoiceKind,
    /// True if `target` is not a scene
    invalid: bool,
}

/// Detail panel record for one node.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    derive_getters::Getters,
)]
#[serde(rename_all = "camelCase")]
pub struct SceneSummary {
    /// Node id
    #[serde(skip)]
    id: String,
    /// Heading; the scene id
    title: String,
    /// Description text with any color dropped
    description_text: String,
    /// Choice labels in order
    choices: Vec<String>,
    /// True for synthesized nodes
    invalid: bool,
}

impl SceneSummary {
    fn for_scene(scene: &SceneRef<'_>) -> Self {
        Self {
            id: scene.id().to_string(),
            title: scene.id().to_string(),
            description_text: scene
                .description()
                .map(|d| d.text().to_string())
                .unwrap_or_default(),
            choices: scene
                .choices()
                .map(|c| {
                    c.text()
                        .filter(|t| !t.is_empty())
                        .unwrap_or(NO_CHOICE_TEXT)
                        .to_string()
                })
                .collect(),
            invalid: false,
        }
    }

    fn for_missing(id: &str, notice: &str) -> Self {
        Self {
            id: id.to_string(),
            title: id.to_string(),
            description_text: notice.to_string(),
            choices: Vec::new(),
            invalid: true,
        }
    }
}

/// Read-only graph view of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct Projection {
    /// Synthesized invalid nodes first, then scenes in document order
    nodes: Vec<ProjectionNode>,
    /// Deduplicated edges in discovery order
    edges: Vec<ProjectionEdge>,
    /// One summary per node, same order as `nodes`
    #[serde(skip)]
    summaries: Vec<SceneSummary>,
}

impl Projection {
    /// Node with the given id.
    pub fn node(&self, id: &str) -> Option<&ProjectionNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The node flagged as start.
    pub fn start_node(&self) -> Option<&ProjectionNode> {
        self.nodes.iter().find(|n| n.is_start)
    }

    /// Summary for the given id.
    pub fn summary(&self, id: &str) -> Option<&SceneSummary> {
        self.summaries.iter().find(|s| s.id == id)
    }

    /// Edges leaving `id`.
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ProjectionEdge> {
        self.edges.iter().filter(move |e| e.source == id)
    }
}

/// Scene the projection flags as start: the preferred id if it exists,
/// otherwise the first scene.
pub fn start_scene_id<'a>(story: &'a Story, preferred: &str) -> Option<&'a str> {
    story
        .ids()
        .find(|id| *id == preferred)
        .or_else(|| story.ids().next())
}

/// Project a story with default settings.
pub fn project(story: &Story, report: &ReferenceReport) -> Projection {
    project_with_config(story, report, &ProjectionConfig::default())
}

/// Project a story into nodes, edges and detail summaries.
///
/// Edges follow the choice field walk (`next_scene`, combat `success` and
/// `failure`, voting options, `requires_vote` outcomes); combat outcomes
/// only count when the choice has a `combat` block. The first edge found
/// between two scenes wins and later ones are dropped.
#[instrument(skip_all, fields(scenes = story.len(), invalid = report.invalid_ids().len()))]
pub fn project_with_config(
    story: &Story,
    report: &ReferenceReport,
    config: &ProjectionConfig,
) -> Projection {
    let mut nodes = Vec::new();
    let mut summaries = Vec::new();

    for id in report.invalid_ids() {
        nodes.push(ProjectionNode::new(id.clone(), true, false));
        summaries.push(SceneSummary::for_missing(id, &config.invalid_scene_notice));
    }

    let start = start_scene_id(story, &config.start_scene);
    let mut edges = Vec::new();
    let mut seen = HashSet::new();

    for scene in story.scenes() {
        nodes.push(ProjectionNode::new(
            scene.id().to_string(),
            false,
            Some(scene.id()) == start,
        ));
        summaries.push(SceneSummary::for_scene(&scene));

        for choice in scene.choices() {
            let has_combat = choice.combat().is_some();
            for target in choice.targets() {
                if matches!(target.field, TargetField::Success | TargetField::Failure)
                    && !has_combat
                {
                    continue;
                }
                if !seen.insert(dedup_key(scene.id(), target.id, config.edge_dedup)) {
                    continue;
                }
                edges.push(ProjectionEdge::new(
                    scene.id().to_string(),
                    target.id.to_string(),
                    target.field.edge_kind(),
                    !story.contains(target.id),
                ));
            }
        }
    }

    debug!(nodes = nodes.len(), edges = edges.len(), "Projection built");
    Projection {
        nodes,
        edges,
        summaries,
    }
}

fn dedup_key<'a>(source: &'a str, target: &'a str, mode: EdgeDedup) -> (&'a str, &'a str) {
    match mode {
        EdgeDedup::Directed => (source, target),
        EdgeDedup::Unordered if target < source => (target, source),
        EdgeDedup::Unordered => (source, target),
    }
}
