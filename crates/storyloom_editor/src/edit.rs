//! Choice edits as submitted by an editing form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storyloom_core::{
    ChoiceKind, ChoiceRef, ChoiceVariant, Combat, Effect, RequiresVote, VotingOption, VotingSystem,
};

/// Tie breaker written when the form leaves it blank.
pub const DEFAULT_TIE_BREAKER: &str = "random";

/// Enemy stats used when a combat form field is missing or not a number.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
#[serde(default)]
pub struct CombatDefaults {
    /// Enemy health
    health: i64,
    /// Enemy attack
    attack: i64,
    /// Enemy defense
    defense: i64,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        Self {
            health: 50,
            attack: 10,
            defense: 5,
        }
    }
}

/// Vote gate values used when a requires-vote form field is missing or not a number.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
#[serde(default)]
pub struct RequiresVoteDefaults {
    /// Minimum number of players
    min_players: i64,
    /// Vote timeout
    timeout: i64,
}

impl Default for RequiresVoteDefaults {
    fn default() -> Self {
        Self {
            min_players: 2,
            timeout: 2,
        }
    }
}

/// Numeric fallbacks for [`ChoiceEdit`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct EditDefaults {
    /// Combat stat fallbacks
    combat: CombatDefaults,
    /// Requires-vote fallbacks
    requires_vote: RequiresVoteDefaults,
}

/// A choice edit in form shape.
///
/// `fields` holds the inputs of the selected variant and `effect` the
/// optional effect inputs, each keyed by their JSON field name. Values may
/// be strings or numbers, as a form would submit them.
///
/// | kind | fields |
/// |---|---|
/// | basic | `next_scene` |
/// | combat | `name`, `health`, `attack`, `defense`, `color`, `success`, `failure` |
/// | voting | `options` (array of `{text, scene}`), `tie_breaker` |
/// | requires_vote | `min_players`, `timeout`, `success_scene`, `failure_scene` |
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use storyloom_core::{ChoiceKind, ChoiceVariant};
/// use storyloom_editor::{ChoiceEdit, EditDefaults};
///
/// let edit = ChoiceEdit::new(ChoiceKind::Basic)
///     .with_text("Leave")
///     .with_field("next_scene", json!(" exit "));
///
/// let variant = edit.to_variant(None, &EditDefaults::default());
/// assert_eq!(variant, ChoiceVariant::Basic { next_scene: Some("exit".into()) });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceEdit {
    /// New choice text; `None` keeps the current text
    #[serde(default)]
    pub text: Option<String>,
    /// Variant to write
    pub kind: ChoiceKind,
    /// Variant inputs
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// Effect inputs
    #[serde(default)]
    pub effect: Map<String, Value>,
}

impl ChoiceEdit {
    /// Empty edit of the given kind.
    pub fn new(kind: ChoiceKind) -> Self {
        Self {
            text: None,
            kind,
            fields: Map::new(),
            effect: Map::new(),
        }
    }

    /// Set the choice text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set one variant input.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set one effect input.
    pub fn with_effect(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.effect.insert(key.into(), value.into());
        self
    }

    /// Build the variant this edit writes.
    ///
    /// `current` is the choice being edited; a voting edit without an
    /// `options` input keeps its options.
    pub fn to_variant(&self, current: Option<&ChoiceRef<'_>>, defaults: &EditDefaults) -> ChoiceVariant {
        match self.kind {
            ChoiceKind::Basic => ChoiceVariant::Basic {
                next_scene: self.string_field("next_scene"),
            },
            ChoiceKind::Combat => ChoiceVariant::Combat {
                enemy: Combat::new(
                    self.int_field("health", defaults.combat.health),
                    self.int_field("attack", defaults.combat.attack),
                    self.int_field("defense", defaults.combat.defense),
                    self.string_field("name"),
                    self.string_field("color"),
                ),
                success: self.string_field("success"),
                failure: self.string_field("failure"),
            },
            ChoiceKind::Voting => {
                let options = match self.fields.get("options").and_then(Value::as_array) {
                    Some(options) => options
                        .iter()
                        .map(|opt| {
                            VotingOption::new(
                                opt.get("text").and_then(Value::as_str).unwrap_or(""),
                                opt.get("scene").and_then(Value::as_str).unwrap_or(""),
                            )
                        })
                        .collect(),
                    None => current
                        .map(|choice| {
                            choice
                                .voting_options()
                                .into_iter()
                                .map(|opt| VotingOption::new(opt.text, opt.scene))
                                .collect()
                        })
                        .unwrap_or_default(),
                };
                let tie_breaker = self
                    .string_field("tie_breaker")
                    .unwrap_or_else(|| DEFAULT_TIE_BREAKER.to_string());
                ChoiceVariant::Voting(VotingSystem::majority(options, tie_breaker))
            }
            ChoiceKind::RequiresVote => ChoiceVariant::RequiresVote(RequiresVote::new(
                self.int_field("min_players", defaults.requires_vote.min_players),
                self.int_field("timeout", defaults.requires_vote.timeout),
                self.string_field("success_scene"),
                self.string_field("failure_scene"),
            )),
        }
    }

    /// Build the effect this edit writes, if any stat was filled in.
    ///
    /// A filled-in stat that is not a number counts as 0.
    pub fn to_effect(&self) -> Option<Effect> {
        let stat = |key: &str| {
            let value = self.effect.get(key).filter(|v| is_filled(v))?;
            Some(parse_int(value).unwrap_or(0))
        };

        let effect = Effect::new(
            stat("heal"),
            stat("damage"),
            stat("buff_attack"),
            stat("buff_defense"),
        );
        (!effect.is_empty()).then_some(effect)
    }

    fn string_field(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn int_field(&self, key: &str, default: i64) -> i64 {
        self.fields.get(key).and_then(parse_int).unwrap_or(default)
    }
}

/// True for a number, or a string with something besides whitespace.
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        _ => false,
    }
}

/// Lenient integer read: JSON numbers truncate toward zero, strings yield
/// their leading integer.
fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let digits_start = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..digits_start + digits_len].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_int_numbers() {
        assert_eq!(parse_int(&json!(12)), Some(12));
        assert_eq!(parse_int(&json!(7.9)), Some(7));
        assert_eq!(parse_int(&json!(-7.9)), Some(-7));
        assert_eq!(parse_int(&json!(0)), Some(0));
    }

    #[test]
    fn test_parse_int_strings() {
        assert_eq!(parse_int(&json!("12")), Some(12));
        assert_eq!(parse_int(&json!(" 7 ")), Some(7));
        assert_eq!(parse_int(&json!("12abc")), Some(12));
        assert_eq!(parse_int(&json!("-3")), Some(-3));
        assert_eq!(parse_int(&json!("+4")), Some(4));
        assert_eq!(parse_int(&json!("abc")), None);
        assert_eq!(parse_int(&json!("-")), None);
        assert_eq!(parse_int(&json!("")), None);
    }

    #[test]
    fn test_parse_int_other_values() {
        assert_eq!(parse_int(&json!(null)), None);
        assert_eq!(parse_int(&json!(true)), None);
        assert_eq!(parse_int(&json!([1])), None);
    }

    #[test]
    fn test_is_filled() {
        assert!(is_filled(&json!(0)));
        assert!(is_filled(&json!("x")));
        assert!(!is_filled(&json!("  ")));
        assert!(!is_filled(&json!(null)));
    }
}
