//! Typed choice variants written by the editor.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storyloom_error::{StoryError, StoryErrorKind, StoryResult};

/// Default description color.
pub const DEFAULT_COLOR: &str = "white";

/// Colors the editor offers for combat enemies.
pub const COMBAT_COLORS: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Every field that selects or belongs to a choice variant, plus `effect`.
///
/// Editing a choice removes all of these before writing the new variant.
pub const VARIANT_FIELDS: &[&str] = &[
    "combat",
    "voting_system",
    "requires_vote",
    "next_scene",
    "success",
    "failure",
    "effect",
];

/// Kind of transition a choice performs; also the kind of a graph edge.
///
/// # Examples
///
/// ```
/// use storyloom_core::ChoiceKind;
///
/// let kind: ChoiceKind = "requires_vote".parse().unwrap();
/// assert_eq!(kind, ChoiceKind::RequiresVote);
/// assert_eq!(kind.to_string(), "requires_vote");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChoiceKind {
    /// Plain transition via `next_scene`
    #[display("basic")]
    Basic,
    /// Fight with `success`/`failure` outcomes
    #[display("combat")]
    Combat,
    /// Group vote among options
    #[display("voting")]
    Voting,
    /// Gated on a minimum number of votes
    #[display("requires_vote")]
    RequiresVote,
}

/// Enemy stats for a combat choice.
///
/// Field order follows how the editor writes the block: stats first,
/// then the optional name and color.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct Combat {
    /// Enemy health
    health: i64,
    /// Enemy attack
    attack: i64,
    /// Enemy defense
    defense: i64,
    /// Enemy name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Enemy display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

/// One option of a voting choice.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct VotingOption {
    /// Option label
    #[new(into)]
    text: String,
    /// Target scene id
    #[new(into)]
    scene: String,
}

impl VotingOption {
    /// True if both label and target are non-blank.
    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && !self.scene.trim().is_empty()
    }
}

/// Voting block of a voting choice.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
)]
pub struct VotingSystem {
    /// Vote counting rule; always "majority"
    #[serde(rename = "type")]
    rule: String,
    /// Options in display order
    options: Vec<VotingOption>,
    /// Tie resolution; "random" unless set otherwise
    tie_breaker: String,
}

impl VotingSystem {
    /// Majority vote over `options`, keeping only complete options.
    pub fn majority(options: Vec<VotingOption>, tie_breaker: impl Into<String>) -> Self {
        Self {
            rule: "majority".to_string(),
            options: options
                .into_iter()
                .filter(VotingOption::is_complete)
                .map(|o| VotingOption::new(o.text.trim(), o.scene.trim()))
                .collect(),
            tie_breaker: tie_breaker.into(),
        }
    }
}

/// Vote gate of a requires-vote choice.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct RequiresVote {
    /// Minimum number of participating players
    min_players: i64,
    /// Vote timeout
    timeout: i64,
    /// Scene when the vote passes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    success_scene: Option<String>,
    /// Scene when the vote fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure_scene: Option<String>,
}

/// Stat changes applied when a choice is taken.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct Effect {
    /// Health restored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    heal: Option<i64>,
    /// Damage taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    damage: Option<i64>,
    /// Attack bonus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    buff_attack: Option<i64>,
    /// Defense bonus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    buff_defense: Option<i64>,
}

impl Effect {
    /// True if no stat is set.
    pub fn is_empty(&self) -> bool {
        self.heal.is_none()
            && self.damage.is_none()
            && self.buff_attack.is_none()
            && self.buff_defense.is_none()
    }
}

/// A single well-formed choice variant.
///
/// Writing a variant always clears every other variant's fields first, so a
/// choice edited through this type never carries more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceVariant {
    /// Plain transition; `None` means the choice leads nowhere yet
    Basic {
        /// Target scene
        next_scene: Option<String>,
    },
    /// Fight an enemy
    Combat {
        /// Enemy stats
        enemy: Combat,
        /// Scene on victory
        success: Option<String>,
        /// Scene on defeat
        failure: Option<String>,
    },
    /// Group vote
    Voting(VotingSystem),
    /// Vote-gated transition
    RequiresVote(RequiresVote),
}

impl ChoiceVariant {
    /// Kind of this variant.
    pub fn kind(&self) -> ChoiceKind {
        match self {
            ChoiceVariant::Basic { .. } => ChoiceKind::Basic,
            ChoiceVariant::Combat { .. } => ChoiceKind::Combat,
            ChoiceVariant::Voting(_) => ChoiceKind::Voting,
            ChoiceVariant::RequiresVote(_) => ChoiceKind::RequiresVote,
        }
    }

    /// The JSON fields this variant writes, in write order.
    pub fn fields(&self) -> StoryResult<Vec<(&'static str, Value)>> {
        let mut fields = Vec::new();
        match self {
            ChoiceVariant::Basic { next_scene } => {
                if let Some(next) = non_blank(next_scene) {
                    fields.push(("next_scene", Value::from(next)));
                }
            }
            ChoiceVariant::Combat {
                enemy,
                success,
                failure,
            } => {
                fields.push(("combat", to_value(enemy)?));
                if let Some(success) = non_blank(success) {
                    fields.push(("success", Value::from(success)));
                }
                if let Some(failure) = non_blank(failure) {
                    fields.push(("failure", Value::from(failure)));
                }
            }
            ChoiceVariant::Voting(voting) => {
                fields.push(("voting_system", to_value(voting)?));
            }
            ChoiceVariant::RequiresVote(gate) => {
                fields.push(("requires_vote", to_value(gate)?));
            }
        }
        Ok(fields)
    }

    /// Replace every variant field of `choice` with this variant and `effect`.
    ///
    /// All values are serialized before the choice is touched.
    pub fn apply(&self, choice: &mut Map<String, Value>, effect: Option<&Effect>) -> StoryResult<()> {
        let mut fields = self.fields()?;
        if let Some(effect) = effect.filter(|e| !e.is_empty()) {
            fields.push(("effect", to_value(effect)?));
        }

        for key in VARIANT_FIELDS {
            choice.shift_remove(*key);
        }
        for (key, value) in fields {
            choice.insert(key.to_string(), value);
        }
        Ok(())
    }
}

/// Replacement description written by the editor as `{"text", "color"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct DescriptionUpdate {
    /// New text
    #[new(into)]
    pub text: String,
    /// New color; the configured default applies when absent
    #[new(default)]
    pub color: Option<String>,
}

impl DescriptionUpdate {
    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// JSON form, falling back to `default_color`.
    pub fn to_value(&self, default_color: &str) -> Value {
        let color = self
            .color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(default_color);
        serde_json::json!({
            "text": self.text.trim(),
            "color": color,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn to_value<T: Serialize>(value: &T) -> StoryResult<Value> {
    serde_json::to_value(value).map_err(|e| StoryError::new(StoryErrorKind::Serialize(e.to_string())))
}
