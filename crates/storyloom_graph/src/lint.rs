//! Story linting with actionable messages.
//!
//! Goes beyond dangling-reference detection: structural gaps the runtime
//! trips over (no start scene, scenes without description or choices),
//! choices carrying more than one variant, odd scene ids, and scenes the
//! player can never reach.

use crate::{ProjectionConfig, ReferenceReport, start_scene_id, validate};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use storyloom_core::{COMBAT_COLORS, Story, TargetField};
use tracing::{debug, instrument};

static SCENE_ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok());

fn is_plain_scene_id(id: &str) -> bool {
    SCENE_ID_PATTERN
        .as_ref()
        .map(|re| re.is_match(id))
        .unwrap_or(true)
}

/// Result of linting a story.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    /// Problems that break navigation (must be fixed)
    pub errors: Vec<LintError>,
    /// Problems worth reviewing
    pub warnings: Vec<LintWarning>,
}

impl LintReport {
    /// Creates a new report with no errors or warnings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if linting found no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: LintError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: LintWarning) {
        self.warnings.push(warning);
    }

    /// Formats errors as a human-readable string.
    pub fn format_errors(&self) -> String {
        let mut output = String::new();

        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                output.push_str("\n\n");
            }
            output.push_str(&format!("Error {}: {}", i + 1, error.message));

            if let Some(suggestion) = &error.suggestion {
                output.push_str(&format!("\n\n  Suggestion: {}", suggestion));
            }
        }

        output
    }

    /// Formats warnings as a human-readable string.
    pub fn format_warnings(&self) -> String {
        let mut output = String::new();

        for (i, warning) in self.warnings.iter().enumerate() {
            if i > 0 {
                output.push_str("\n\n");
            }
            output.push_str(&format!("Warning {}: {}", i + 1, warning.message));
        }

        output
    }
}

/// A lint error with location and fix suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct LintError {
    /// Type of lint error
    pub kind: LintErrorKind,
    /// Where in the story the problem sits
    pub location: Option<LintLocation>,
    /// Human-readable error message
    pub message: String,
    /// Suggestion on how to fix the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A lint warning that should be reviewed.
#[derive(Debug, Clone, Serialize)]
pub struct LintWarning {
    /// Type of lint warning
    pub kind: LintWarningKind,
    /// Where in the story the problem sits
    pub location: Option<LintLocation>,
    /// Human-readable warning message
    pub message: String,
}

/// Location of a lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintLocation {
    /// Scene id
    pub scene: String,
    /// Choice index within the scene
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<usize>,
    /// Choice field, e.g. "next_scene"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl LintLocation {
    fn scene(scene: &str) -> Self {
        Self {
            scene: scene.to_string(),
            choice: None,
            field: None,
        }
    }

    fn choice(scene: &str, choice: usize) -> Self {
        Self {
            scene: scene.to_string(),
            choice: Some(choice),
            field: None,
        }
    }
}

/// Types of lint errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintErrorKind {
    /// A choice targets a scene that does not exist
    DanglingReference,
}

/// Types of lint warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintWarningKind {
    /// No scene named by the configured start id
    MissingStartScene,
    /// Scene has no description
    MissingDescription,
    /// Scene has no choice list
    MissingChoices,
    /// Choice has no text
    MissingChoiceText,
    /// Choice carries more than one variant
    MultipleVariants,
    /// Scene id outside `[A-Za-z0-9_-]`
    InvalidSceneId,
    /// Combat color outside the editor palette
    UnknownColor,
    /// Scene cannot be reached from the start scene
    UnreachableScene,
}

/// Configuration for lint behavior.
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
#[setters(prefix = "with_")]
pub struct LintConfig {
    /// Warn on scenes unreachable from the start scene
    warn_unreachable: bool,
    /// Warn on scene ids outside `[A-Za-z0-9_-]`
    warn_scene_id_pattern: bool,
    /// Warn on combat colors outside the editor palette
    warn_unknown_colors: bool,
    /// Suggest the closest existing scene for dangling references
    suggest_closest: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            warn_unreachable: true,
            warn_scene_id_pattern: true,
            warn_unknown_colors: true,
            suggest_closest: true,
        }
    }
}

/// Lints a story with default settings.
///
/// # Examples
///
/// ```
/// use storyloom_core::Story;
/// use storyloom_graph::lint_story;
///
/// let story = Story::load(r#"{
///     "start": {"description": "Begin", "choices": [{"text": "Go", "next_scene": "ende"}]},
///     "end": {"description": "Fin", "choices": []}
/// }"#)?;
///
/// let report = lint_story(&story);
/// assert!(!report.is_valid());
/// assert!(report.errors[0].suggestion.as_deref().unwrap().contains("end"));
/// # Ok::<(), storyloom_error::StoryError>(())
/// ```
pub fn lint_story(story: &Story) -> LintReport {
    lint_story_with_config(story, &LintConfig::default(), &ProjectionConfig::default())
}

/// Lints a story with custom configuration.
#[instrument(skip_all, fields(scenes = story.len()))]
pub fn lint_story_with_config(
    story: &Story,
    config: &LintConfig,
    projection: &ProjectionConfig,
) -> LintReport {
    let mut report = LintReport::new();

    let references = validate(story);
    check_references(story, &references, config, &mut report);
    check_structure(story, config, projection, &mut report);

    if config.warn_unreachable {
        check_reachability(story, projection, &mut report);
    }

    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Lint complete"
    );
    report
}

/// Turns dangling references into errors.
fn check_references(
    story: &Story,
    references: &ReferenceReport,
    config: &LintConfig,
    report: &mut LintReport,
) {
    for dangling in references.dangling() {
        let suggestion = if config.suggest_closest {
            match find_closest_scene(story, dangling.target()) {
                Some(closest) => format!(
                    "Did you mean '{}'? Otherwise add a scene named '{}'.",
                    closest,
                    dangling.target()
                ),
                None => format!("Add a scene named '{}'.", dangling.target()),
            }
        } else {
            format!("Add a scene named '{}'.", dangling.target())
        };

        report.add_error(LintError {
            kind: LintErrorKind::DanglingReference,
            location: Some(LintLocation {
                scene: dangling.scene().clone(),
                choice: Some(*dangling.choice()),
                field: Some(dangling.field().to_string()),
            }),
            message: format!(
                "Choice {} in scene '{}' references missing scene '{}' via {}",
                dangling.choice(),
                dangling.scene(),
                dangling.target(),
                dangling.field()
            ),
            suggestion: Some(suggestion),
        });
    }
}

/// Checks scenes and choices for missing or conflicting fields.
fn check_structure(
    story: &Story,
    config: &LintConfig,
    projection: &ProjectionConfig,
    report: &mut LintReport,
) {
    if !story.contains(projection.start_scene()) {
        report.add_warning(LintWarning {
            kind: LintWarningKind::MissingStartScene,
            location: None,
            message: format!(
                "No '{}' scene; the first scene is used as the start",
                projection.start_scene()
            ),
        });
    }

    for scene in story.scenes() {
        let id = scene.id();

        if config.warn_scene_id_pattern && !is_plain_scene_id(id) {
            report.add_warning(LintWarning {
                kind: LintWarningKind::InvalidSceneId,
                location: Some(LintLocation::scene(id)),
                message: format!(
                    "Scene id '{}' should only contain letters, digits, '_' or '-'",
                    id
                ),
            });
        }

        if scene.description().is_none() {
            report.add_warning(LintWarning {
                kind: LintWarningKind::MissingDescription,
                location: Some(LintLocation::scene(id)),
                message: format!("Scene '{}' has no description", id),
            });
        }

        if !scene.has_choice_list() {
            report.add_warning(LintWarning {
                kind: LintWarningKind::MissingChoices,
                location: Some(LintLocation::scene(id)),
                message: format!("Scene '{}' has no choices list", id),
            });
        }

        for choice in scene.choices() {
            if choice.text().is_none_or(str::is_empty) {
                report.add_warning(LintWarning {
                    kind: LintWarningKind::MissingChoiceText,
                    location: Some(LintLocation::choice(id, choice.index())),
                    message: format!("Choice {} in scene '{}' has no text", choice.index(), id),
                });
            }

            let kinds = choice.kinds();
            if kinds.len() > 1 {
                let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
                report.add_warning(LintWarning {
                    kind: LintWarningKind::MultipleVariants,
                    location: Some(LintLocation::choice(id, choice.index())),
                    message: format!(
                        "Choice {} in scene '{}' mixes variants: {}",
                        choice.index(),
                        id,
                        names.join(", ")
                    ),
                });
            }

            if config.warn_unknown_colors
                && let Some(color) = choice
                    .combat()
                    .and_then(|c| c.get("color"))
                    .and_then(|c| c.as_str())
                && !COMBAT_COLORS.contains(&color)
            {
                report.add_warning(LintWarning {
                    kind: LintWarningKind::UnknownColor,
                    location: Some(LintLocation::choice(id, choice.index())),
                    message: format!(
                        "Combat color '{}' in scene '{}' is not one of: {}",
                        color,
                        id,
                        COMBAT_COLORS.join(", ")
                    ),
                });
            }
        }
    }
}

/// Warns about scenes no path from the start scene reaches.
fn check_reachability(story: &Story, projection: &ProjectionConfig, report: &mut LintReport) {
    let Some(start) = start_scene_id(story, projection.start_scene()) else {
        return;
    };

    let mut graph = DiGraph::<&str, ()>::new();
    let mut node_map = HashMap::<&str, NodeIndex>::new();
    for id in story.ids() {
        node_map.insert(id, graph.add_node(id));
    }

    for scene in story.scenes() {
        let from = node_map[scene.id()];
        for choice in scene.choices() {
            let has_combat = choice.combat().is_some();
            for target in choice.targets() {
                if matches!(target.field, TargetField::Success | TargetField::Failure)
                    && !has_combat
                {
                    continue;
                }
                if let Some(&to) = node_map.get(target.id) {
                    graph.update_edge(from, to, ());
                }
            }
        }
    }

    let mut reached = HashSet::new();
    let mut dfs = Dfs::new(&graph, node_map[start]);
    while let Some(node) = dfs.next(&graph) {
        reached.insert(graph[node]);
    }

    for id in story.ids().filter(|id| !reached.contains(id)) {
        report.add_warning(LintWarning {
            kind: LintWarningKind::UnreachableScene,
            location: Some(LintLocation::scene(id)),
            message: format!("Scene '{}' cannot be reached from '{}'", id, start),
        });
    }
}

/// Finds the closest existing scene id using simple string distance.
fn find_closest_scene<'a>(story: &'a Story, missing: &str) -> Option<&'a str> {
    let missing_lower = missing.to_lowercase();

    // Case-insensitive exact match first
    if let Some(id) = story.ids().find(|id| id.to_lowercase() == missing_lower) {
        return Some(id);
    }

    let mut best_match: Option<(&str, usize)> = None;
    for id in story.ids() {
        let distance = levenshtein_distance(&missing_lower, &id.to_lowercase());
        // Allow up to 3 character differences
        if distance <= 3 && best_match.is_none_or(|(_, best)| distance < best) {
            best_match = Some((id, distance));
        }
    }

    best_match.map(|(id, _)| id)
}

/// Simple Levenshtein distance calculation.
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, val) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *val = j;
    }

    for (i, c1) in s1.chars().enumerate() {
        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[len1][len2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("cave", "cave"), 0);
        assert_eq!(levenshtein_distance("cave", "caves"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_closest_scene_prefers_case_match() {
        let story = Story::load(r#"{"Start": {}, "stars": {}}"#).unwrap();
        assert_eq!(find_closest_scene(&story, "start"), Some("Start"));
        assert_eq!(find_closest_scene(&story, "completely-different"), None);
    }
}
