//! The loaded story document.

use crate::SceneRef;
use serde_json::{Map, Value};
use storyloom_error::{FormatErrorKind, StoryError, StoryErrorKind, StoryResult};
use tracing::{debug, instrument};

/// Reserved top-level key that is never a scene.
pub const CONFIG_KEY: &str = "config";

/// A branching narrative document.
///
/// The document is held exactly as parsed, in key order, including any
/// fields this crate does not understand, so that [`Story::export`] is
/// lossless for everything the editor has not touched. Scenes are read
/// through borrowed [`SceneRef`] views; scene ids inside choices are plain
/// strings resolved against the document on every read.
///
/// # Examples
///
/// ```
/// use storyloom_core::Story;
///
/// let story = Story::load(r#"{"config": {"players": 2}, "start": {"choices": []}}"#)?;
/// assert_eq!(story.ids().collect::<Vec<_>>(), vec!["start"]);
/// assert!(story.config().is_some());
/// # Ok::<(), storyloom_error::StoryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Story {
    document: Map<String, Value>,
}

impl Story {
    /// Parse a raw JSON document.
    ///
    /// # Errors
    ///
    /// Returns a format error if the text is not JSON, is not an object,
    /// or holds no keys other than `config`.
    #[instrument(skip_all, fields(bytes = raw.len()))]
    pub fn load(raw: &str) -> StoryResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| StoryError::format(FormatErrorKind::Json(e.to_string())))?;
        Self::from_value(value)
    }

    /// Accept an already parsed document.
    ///
    /// # Errors
    ///
    /// Same format checks as [`Story::load`].
    pub fn from_value(value: Value) -> StoryResult<Self> {
        let Value::Object(document) = value else {
            return Err(StoryError::format(FormatErrorKind::NotAnObject));
        };

        let scenes = document.keys().filter(|k| *k != CONFIG_KEY).count();
        if scenes == 0 {
            return Err(StoryError::format(FormatErrorKind::NoScenes));
        }

        debug!(scenes, has_config = document.contains_key(CONFIG_KEY), "Loaded story");
        Ok(Self { document })
    }

    /// Look up a scene by id.
    pub fn get(&self, id: &str) -> Option<SceneRef<'_>> {
        if id == CONFIG_KEY {
            return None;
        }
        self.document
            .get_key_value(id)
            .map(|(key, value)| SceneRef::new(key, value))
    }

    /// True if `id` names a scene.
    pub fn contains(&self, id: &str) -> bool {
        id != CONFIG_KEY && self.document.contains_key(id)
    }

    /// Scene ids in document order, excluding `config`.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.document
            .keys()
            .map(String::as_str)
            .filter(|k| *k != CONFIG_KEY)
    }

    /// All scenes in document order.
    pub fn scenes(&self) -> impl Iterator<Item = SceneRef<'_>> {
        self.document
            .iter()
            .filter(|(k, _)| *k != CONFIG_KEY)
            .map(|(k, v)| SceneRef::new(k, v))
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.ids().count()
    }

    /// True if the story holds no scenes (only reachable after deletions).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The opaque `config` entry, if present.
    pub fn config(&self) -> Option<&Value> {
        self.document.get(CONFIG_KEY)
    }

    /// The full document, `config` included.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Owned copy of the full document as a JSON value.
    pub fn as_value(&self) -> Value {
        Value::Object(self.document.clone())
    }

    /// Mutable access to one scene's raw value.
    ///
    /// Low-level hook for the mutation engine; callers are responsible for
    /// keeping references consistent.
    pub fn scene_value_mut(&mut self, id: &str) -> Option<&mut Value> {
        if id == CONFIG_KEY {
            return None;
        }
        self.document.get_mut(id)
    }

    /// Mutable iteration over every scene's raw value, `config` excluded.
    pub fn scene_values_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.document
            .iter_mut()
            .filter(|(k, _)| *k != CONFIG_KEY)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Remove a scene entry, keeping the order of the others.
    pub fn remove_scene(&mut self, id: &str) -> Option<Value> {
        if id == CONFIG_KEY {
            return None;
        }
        self.document.shift_remove(id)
    }

    /// Insert a scene entry.
    ///
    /// A new id is appended; an existing id keeps its position and has its
    /// value replaced, which is returned.
    pub fn insert_scene(&mut self, id: impl Into<String>, scene: Value) -> StoryResult<Option<Value>> {
        let id = id.into();
        if id == CONFIG_KEY {
            return Err(StoryError::invalid_argument(format!(
                "'{}' is reserved and cannot name a scene",
                CONFIG_KEY
            )));
        }
        Ok(self.document.insert(id, scene))
    }

    /// Serialize the whole document with 2-space indentation.
    #[instrument(skip(self))]
    pub fn export(&self) -> StoryResult<String> {
        serde_json::to_string_pretty(&self.document)
            .map_err(|e| StoryError::new(StoryErrorKind::Serialize(e.to_string())))
    }
}

impl std::str::FromStr for Story {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::load(s)
    }
}
