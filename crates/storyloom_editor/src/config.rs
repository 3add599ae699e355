//! TOML configuration for editing, projection and linting.

use crate::{CombatDefaults, EditDefaults, RequiresVoteDefaults};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyloom_core::DEFAULT_COLOR;
use storyloom_error::ConfigError;
use storyloom_graph::{LintConfig, ProjectionConfig};
use tracing::{debug, instrument};

/// Placeholder text for new choices.
pub const NEW_CHOICE_TEXT: &str = "New Choice";

fn default_new_choice_text() -> String {
    NEW_CHOICE_TEXT.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Complete Storyloom configuration.
///
/// Every section is optional; an empty file yields the defaults.
///
/// # Examples
///
/// ```
/// use storyloom_editor::StoryloomConfig;
///
/// let config = StoryloomConfig::from_toml_str(r#"
///     [editor]
///     new_choice_text = "Untitled"
///
///     [projection]
///     edge_dedup = "directed"
/// "#)?;
/// assert_eq!(config.editor.new_choice_text, "Untitled");
/// assert_eq!(*config.editor.combat_defaults.health(), 50);
/// # Ok::<(), storyloom_error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryloomConfig {
    /// Editing defaults
    #[serde(default)]
    pub editor: EditorSettings,
    /// Graph projection settings
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Lint settings
    #[serde(default)]
    pub lint: LintConfig,
}

impl StoryloomConfig {
    /// Load configuration from a TOML file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::new(format!("Invalid TOML: {}", e)))
    }
}

/// `[editor]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Text of a freshly added choice
    #[serde(default = "default_new_choice_text")]
    pub new_choice_text: String,
    /// Description color written when none is given
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Combat stat fallbacks
    #[serde(default)]
    pub combat_defaults: CombatDefaults,
    /// Requires-vote fallbacks
    #[serde(default)]
    pub requires_vote_defaults: RequiresVoteDefaults,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            new_choice_text: default_new_choice_text(),
            default_color: default_color(),
            combat_defaults: CombatDefaults::default(),
            requires_vote_defaults: RequiresVoteDefaults::default(),
        }
    }
}

impl EditorSettings {
    /// Numeric fallbacks for choice edits.
    pub fn edit_defaults(&self) -> EditDefaults {
        EditDefaults::new(self.combat_defaults, self.requires_vote_defaults)
    }
}
