//! Borrowed views over scene entries.

use crate::{ChoiceRef, DEFAULT_COLOR};
use serde_json::Value;

/// Scene description as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Description<'a> {
    /// A bare string
    Plain(&'a str),
    /// An object with `text` and optional `color`
    Styled {
        /// Description text (empty if the object has none)
        text: &'a str,
        /// Display color, if given
        color: Option<&'a str>,
    },
}

impl<'a> Description<'a> {
    /// Flattened description text.
    pub fn text(&self) -> &'a str {
        match self {
            Description::Plain(text) => text,
            Description::Styled { text, .. } => text,
        }
    }

    /// Display color, defaulting to white.
    pub fn color(&self) -> &'a str {
        match self {
            Description::Styled {
                color: Some(color), ..
            } => color,
            _ => DEFAULT_COLOR,
        }
    }
}

/// Read-only view of one scene.
///
/// Tolerates malformed entries: a scene that is not an object simply has
/// no description and no choices.
#[derive(Debug, Clone, Copy)]
pub struct SceneRef<'a> {
    id: &'a str,
    value: &'a Value,
}

impl<'a> SceneRef<'a> {
    pub(crate) fn new(id: &'a str, value: &'a Value) -> Self {
        Self { id, value }
    }

    /// Scene id.
    pub fn id(&self) -> &'a str {
        self.id
    }

    /// Raw scene value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Parsed description, if one is present.
    pub fn description(&self) -> Option<Description<'a>> {
        match self.value.get("description")? {
            Value::String(text) => Some(Description::Plain(text)),
            Value::Object(fields) => Some(Description::Styled {
                text: fields.get("text").and_then(Value::as_str).unwrap_or(""),
                color: fields.get("color").and_then(Value::as_str),
            }),
            _ => None,
        }
    }

    /// True if the scene carries a `choices` array (possibly empty).
    pub fn has_choice_list(&self) -> bool {
        self.value.get("choices").is_some_and(Value::is_array)
    }

    /// Choices in order; positions match the indices used for editing.
    pub fn choices(&self) -> impl Iterator<Item = ChoiceRef<'a>> + use<'a> {
        self.value
            .get("choices")
            .and_then(Value::as_array)
            .map(|choices| choices.as_slice())
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, value)| ChoiceRef::new(index, value))
    }

    /// Choice at `index`.
    pub fn choice(&self, index: usize) -> Option<ChoiceRef<'a>> {
        self.value
            .get("choices")
            .and_then(Value::as_array)?
            .get(index)
            .map(|value| ChoiceRef::new(index, value))
    }

    /// Number of choices.
    pub fn choice_count(&self) -> usize {
        self.value
            .get("choices")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}
