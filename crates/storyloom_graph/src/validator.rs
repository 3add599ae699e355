//! Dangling scene reference detection.

use std::collections::HashSet;
use storyloom_core::{Story, TargetField};
use tracing::{debug, instrument};

/// One choice field naming a scene that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_new::new)]
pub struct DanglingReference {
    /// Scene holding the choice
    scene: String,
    /// Choice position within the scene
    choice: usize,
    /// Field holding the reference
    field: TargetField,
    /// Missing scene id
    target: String,
}

/// Result of scanning a story for dangling references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceReport {
    invalid_ids: Vec<String>,
    seen: HashSet<String>,
    dangling: Vec<DanglingReference>,
}

impl ReferenceReport {
    /// Distinct missing ids, in first-referenced order.
    pub fn invalid_ids(&self) -> &[String] {
        &self.invalid_ids
    }

    /// True if `id` is referenced somewhere but is not a scene.
    pub fn is_invalid(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Every dangling reference, one per offending field.
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    /// True if the story has no dangling references.
    pub fn is_clean(&self) -> bool {
        self.invalid_ids.is_empty()
    }

    fn record(&mut self, reference: DanglingReference) {
        if self.seen.insert(reference.target.clone()) {
            self.invalid_ids.push(reference.target.clone());
        }
        self.dangling.push(reference);
    }
}

/// Find every scene id referenced by a choice that is not a scene.
///
/// Walks all target fields of every choice, including `success`/`failure`
/// on choices without a `combat` block.
///
/// # Examples
///
/// ```
/// use storyloom_core::Story;
/// use storyloom_graph::validate;
///
/// let story = Story::load(r#"{"start": {"choices": [
///     {"text": "a", "next_scene": "nowhere"},
///     {"text": "b", "next_scene": "nowhere"}
/// ]}}"#)?;
/// let report = validate(&story);
/// assert_eq!(report.invalid_ids(), ["nowhere"]);
/// assert_eq!(report.dangling().len(), 2);
/// # Ok::<(), storyloom_error::StoryError>(())
/// ```
#[instrument(skip_all, fields(scenes = story.len()))]
pub fn validate(story: &Story) -> ReferenceReport {
    let mut report = ReferenceReport::default();

    for scene in story.scenes() {
        for choice in scene.choices() {
            for target in choice.targets() {
                if !story.contains(target.id) {
                    report.record(DanglingReference::new(
                        scene.id().to_string(),
                        choice.index(),
                        target.field,
                        target.id.to_string(),
                    ));
                }
            }
        }
    }

    debug!(
        invalid = report.invalid_ids.len(),
        references = report.dangling.len(),
        "Reference validation complete"
    );
    report
}
