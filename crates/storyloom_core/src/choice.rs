//! Borrowed views over choice entries and their scene references.

use crate::ChoiceKind;
use serde_json::Value;

/// JavaScript-style truthiness, which decides whether an optional field counts as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_truthy(v))
}

fn target(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Choice field that can hold a scene id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TargetField {
    /// `next_scene`
    #[display("next_scene")]
    NextScene,
    /// `success`
    #[display("success")]
    Success,
    /// `failure`
    #[display("failure")]
    Failure,
    /// `voting_system.options[n].scene`
    #[display("voting_system.options[{}].scene", _0)]
    VotingOption(usize),
    /// `requires_vote.success_scene`
    #[display("requires_vote.success_scene")]
    RequiresVoteSuccess,
    /// `requires_vote.failure_scene`
    #[display("requires_vote.failure_scene")]
    RequiresVoteFailure,
}

impl TargetField {
    /// Edge kind a reference through this field is drawn as.
    pub fn edge_kind(&self) -> ChoiceKind {
        match self {
            TargetField::NextScene => ChoiceKind::Basic,
            TargetField::Success | TargetField::Failure => ChoiceKind::Combat,
            TargetField::VotingOption(_) => ChoiceKind::Voting,
            TargetField::RequiresVoteSuccess | TargetField::RequiresVoteFailure => {
                ChoiceKind::RequiresVote
            }
        }
    }
}

/// A non-empty scene id referenced by a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target<'a> {
    /// Field holding the reference
    pub field: TargetField,
    /// Referenced scene id
    pub id: &'a str,
}

/// Read-only view of one voting option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingOptionRef<'a> {
    /// Position within `voting_system.options`
    pub index: usize,
    /// Option label (empty if missing)
    pub text: &'a str,
    /// Target scene (empty if missing)
    pub scene: &'a str,
}

/// Read-only view of one choice.
///
/// A well-formed choice carries exactly one variant, but documents loaded
/// from disk may carry several; every accessor works independently so
/// that such choices are still walked completely.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceRef<'a> {
    index: usize,
    value: &'a Value,
}

impl<'a> ChoiceRef<'a> {
    /// View over a raw choice value sitting at `index` in its scene.
    pub fn new(index: usize, value: &'a Value) -> Self {
        Self { index, value }
    }

    /// Position within the scene's choice list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw choice value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Choice label.
    pub fn text(&self) -> Option<&'a str> {
        self.value.get("text").and_then(Value::as_str)
    }

    /// `next_scene` target.
    pub fn next_scene(&self) -> Option<&'a str> {
        target(self.value.get("next_scene"))
    }

    /// Raw `combat` block, if present.
    pub fn combat(&self) -> Option<&'a Value> {
        present(self.value.get("combat"))
    }

    /// `success` target.
    pub fn success(&self) -> Option<&'a str> {
        target(self.value.get("success"))
    }

    /// `failure` target.
    pub fn failure(&self) -> Option<&'a str> {
        target(self.value.get("failure"))
    }

    /// Raw `voting_system` block, if present.
    pub fn voting_system(&self) -> Option<&'a Value> {
        present(self.value.get("voting_system"))
    }

    /// Voting options in order.
    pub fn voting_options(&self) -> Vec<VotingOptionRef<'a>> {
        let Some(options) = self
            .voting_system()
            .and_then(|vs| present(vs.get("options")))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        options
            .iter()
            .enumerate()
            .map(|(index, opt)| VotingOptionRef {
                index,
                text: opt.get("text").and_then(Value::as_str).unwrap_or(""),
                scene: opt.get("scene").and_then(Value::as_str).unwrap_or(""),
            })
            .collect()
    }

    /// Raw `requires_vote` block, if present.
    pub fn requires_vote(&self) -> Option<&'a Value> {
        present(self.value.get("requires_vote"))
    }

    /// Raw `effect` block, if present.
    pub fn effect(&self) -> Option<&'a Value> {
        present(self.value.get("effect"))
    }

    /// Every variant this choice carries, in canonical order.
    ///
    /// A choice with no variant fields at all is a basic choice without a
    /// transition.
    pub fn kinds(&self) -> Vec<ChoiceKind> {
        let mut kinds = Vec::new();
        if self.next_scene().is_some() {
            kinds.push(ChoiceKind::Basic);
        }
        if self.combat().is_some() {
            kinds.push(ChoiceKind::Combat);
        }
        if self.voting_system().is_some() {
            kinds.push(ChoiceKind::Voting);
        }
        if self.requires_vote().is_some() {
            kinds.push(ChoiceKind::RequiresVote);
        }
        if kinds.is_empty() {
            kinds.push(ChoiceKind::Basic);
        }
        kinds
    }

    /// The variant an editor form opens on: combat, then voting, then
    /// requires-vote, otherwise basic.
    pub fn primary_kind(&self) -> ChoiceKind {
        if self.combat().is_some() {
            ChoiceKind::Combat
        } else if self.voting_system().is_some() {
            ChoiceKind::Voting
        } else if self.requires_vote().is_some() {
            ChoiceKind::RequiresVote
        } else {
            ChoiceKind::Basic
        }
    }

    /// Every non-empty scene reference, in field-check order: `next_scene`,
    /// `success`, `failure`, voting options, then `requires_vote`
    /// success and failure.
    ///
    /// `success`/`failure` are reported whether or not `combat` is set.
    pub fn targets(&self) -> Vec<Target<'a>> {
        let mut targets = Vec::new();
        let mut push = |field, id: Option<&'a str>| {
            if let Some(id) = id {
                targets.push(Target { field, id });
            }
        };

        push(TargetField::NextScene, self.next_scene());
        push(TargetField::Success, self.success());
        push(TargetField::Failure, self.failure());
        for option in self.voting_options() {
            push(
                TargetField::VotingOption(option.index),
                Some(option.scene).filter(|s| !s.is_empty()),
            );
        }
        if let Some(rv) = self.requires_vote() {
            push(TargetField::RequiresVoteSuccess, target(rv.get("success_scene")));
            push(TargetField::RequiresVoteFailure, target(rv.get("failure_scene")));
        }

        targets
    }

    /// True if any target field names `id`.
    pub fn references(&self, id: &str) -> bool {
        self.targets().iter().any(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_matches_form_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
    }

    #[test]
    fn test_targets_field_order() {
        let value = json!({
            "text": "All of it",
            "requires_vote": {"min_players": 2, "timeout": 2, "success_scene": "e", "failure_scene": "f"},
            "voting_system": {"type": "majority", "options": [{"text": "x", "scene": "d"}, {"text": "y", "scene": ""}], "tie_breaker": "random"},
            "failure": "c",
            "success": "b",
            "next_scene": "a"
        });
        let choice = ChoiceRef::new(0, &value);
        let ids: Vec<_> = choice.targets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(
            choice.kinds(),
            vec![ChoiceKind::Basic, ChoiceKind::Voting, ChoiceKind::RequiresVote]
        );
    }

    #[test]
    fn test_stray_success_without_combat_is_a_target() {
        let value = json!({"text": "Run", "success": "away"});
        let choice = ChoiceRef::new(0, &value);
        assert!(choice.combat().is_none());
        assert!(choice.references("away"));
        assert_eq!(choice.primary_kind(), ChoiceKind::Basic);
    }

    #[test]
    fn test_non_object_choice_has_no_targets() {
        let value = json!("just a string");
        let choice = ChoiceRef::new(3, &value);
        assert!(choice.targets().is_empty());
        assert_eq!(choice.text(), None);
        assert_eq!(choice.kinds(), vec![ChoiceKind::Basic]);
    }
}
