//! Editing session: one story, its settings, and the selected scene.

use crate::{
    ChoiceEdit, DeleteReport, StoryloomConfig, add_choice, add_voting_option, delete_choice,
    delete_scene, edit_choice, remove_voting_option, rename_scene, update_description,
};
use serde_json::Value;
use storyloom_core::{DescriptionUpdate, Story, VotingOption};
use storyloom_error::{StoryError, StoryResult};
use storyloom_graph::{
    LintReport, Projection, SceneSummary, lint_story_with_config, project_with_config, validate,
};
use tracing::{debug, info, instrument};

/// Question asked before a destructive operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfirmPrompt {
    /// Delete a whole scene
    #[display("Are you sure you want to delete scene \"{}\"?", id)]
    DeleteScene {
        /// Scene to delete
        id: String,
    },
    /// Delete one choice
    #[display("Are you sure you want to delete this choice?")]
    DeleteChoice {
        /// Scene holding the choice
        scene: String,
        /// Choice position
        index: usize,
    },
}

/// Source of yes/no answers for destructive operations.
pub trait Confirm {
    /// Return true to go ahead.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self(prompt)
    }
}

/// Result of a confirmed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Confirmed and applied
    Applied(T),
    /// Declined; the story is unchanged
    Declined,
}

impl<T> Outcome<T> {
    /// True if the operation ran.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The operation's result, if it ran.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Declined => None,
        }
    }
}

/// An open story with its configuration and current selection.
///
/// All reads (projection, details, lint) are recomputed from the document
/// on each call.
///
/// # Examples
///
/// ```
/// use storyloom_editor::{ConfirmPrompt, EditorSession, Outcome, StoryloomConfig};
///
/// let mut session = EditorSession::load(
///     r#"{"start": {"choices": [{"text": "Go", "next_scene": "end"}]}, "end": {"choices": []}}"#,
///     StoryloomConfig::default(),
/// )?;
///
/// let outcome = session.delete_scene("end", &mut |_: &ConfirmPrompt| false)?;
/// assert_eq!(outcome, Outcome::Declined);
/// assert!(session.story().contains("end"));
/// # Ok::<(), storyloom_error::StoryError>(())
/// ```
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct EditorSession {
    /// The story being edited
    story: Story,
    /// Active settings
    config: StoryloomConfig,
    /// Selected scene id
    selected: Option<String>,
}

impl EditorSession {
    /// Start a session on an already loaded story.
    pub fn new(story: Story, config: StoryloomConfig) -> Self {
        Self {
            story,
            config,
            selected: None,
        }
    }

    /// Parse `raw` and start a session on it.
    pub fn load(raw: &str, config: StoryloomConfig) -> StoryResult<Self> {
        Ok(Self::new(Story::load(raw)?, config))
    }

    /// Replace the story with a newly parsed one.
    ///
    /// On error the current story and selection are kept.
    #[instrument(skip_all, fields(bytes = raw.len()))]
    pub fn open(&mut self, raw: &str) -> StoryResult<()> {
        let story = Story::load(raw)?;
        self.story = story;
        self.selected = None;
        info!(scenes = self.story.len(), "Opened story");
        Ok(())
    }

    /// Select a scene.
    pub fn select(&mut self, id: &str) -> StoryResult<()> {
        if !self.story.contains(id) {
            return Err(StoryError::invalid_argument(format!("no scene named '{}'", id)));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Current graph projection.
    pub fn projection(&self) -> Projection {
        let report = validate(&self.story);
        project_with_config(&self.story, &report, &self.config.projection)
    }

    /// Detail record for a scene or a missing referenced id.
    pub fn scene_details(&self, id: &str) -> Option<SceneSummary> {
        self.projection().summary(id).cloned()
    }

    /// Scene ids a choice can target, in document order.
    pub fn available_scenes(&self) -> Vec<String> {
        self.story.ids().map(str::to_string).collect()
    }

    /// Lint the story with the session's settings.
    pub fn lint(&self) -> LintReport {
        lint_story_with_config(&self.story, &self.config.lint, &self.config.projection)
    }

    /// Rename a scene; the selection follows it.
    pub fn rename_scene(
        &mut self,
        old_id: &str,
        new_id: &str,
        description: Option<DescriptionUpdate>,
    ) -> StoryResult<()> {
        rename_scene(
            &mut self.story,
            old_id,
            new_id,
            description,
            &self.config.editor.default_color,
        )?;
        if self.selected.as_deref() == Some(old_id) {
            self.selected = Some(new_id.to_string());
        }
        Ok(())
    }

    /// Replace a scene's description.
    pub fn update_description(&mut self, id: &str, update: DescriptionUpdate) -> StoryResult<()> {
        update_description(
            &mut self.story,
            id,
            update,
            &self.config.editor.default_color,
        )
    }

    /// Delete a scene after confirmation.
    ///
    /// A missing scene is reported before anything is asked.
    #[instrument(skip(self, confirm))]
    pub fn delete_scene(
        &mut self,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> StoryResult<Outcome<DeleteReport>> {
        if !self.story.contains(id) {
            return Err(StoryError::invalid_argument(format!("no scene named '{}'", id)));
        }
        if !confirm.confirm(&ConfirmPrompt::DeleteScene { id: id.to_string() }) {
            debug!("Scene deletion declined");
            return Ok(Outcome::Declined);
        }

        let report = delete_scene(&mut self.story, id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(Outcome::Applied(report))
    }

    /// Append a placeholder choice to a scene.
    pub fn add_choice(&mut self, scene_id: &str) -> StoryResult<usize> {
        add_choice(
            &mut self.story,
            scene_id,
            &self.config.editor.new_choice_text,
        )
    }

    /// Rewrite a choice from a form edit.
    pub fn edit_choice(&mut self, scene_id: &str, index: usize, edit: &ChoiceEdit) -> StoryResult<()> {
        let defaults = self.config.editor.edit_defaults();
        edit_choice(&mut self.story, scene_id, index, edit, &defaults)
    }

    /// Delete a choice after confirmation.
    ///
    /// A missing scene or out-of-range index is reported before anything is
    /// asked.
    #[instrument(skip(self, confirm))]
    pub fn delete_choice(
        &mut self,
        scene_id: &str,
        index: usize,
        confirm: &mut impl Confirm,
    ) -> StoryResult<Outcome<Value>> {
        let Some(scene) = self.story.get(scene_id) else {
            return Err(StoryError::invalid_argument(format!(
                "no scene named '{}'",
                scene_id
            )));
        };
        let len = scene.choice_count();
        if index >= len {
            return Err(StoryError::index(
                format!("choices of scene '{}'", scene_id),
                index,
                len,
            ));
        }

        let prompt = ConfirmPrompt::DeleteChoice {
            scene: scene_id.to_string(),
            index,
        };
        if !confirm.confirm(&prompt) {
            debug!("Choice deletion declined");
            return Ok(Outcome::Declined);
        }

        delete_choice(&mut self.story, scene_id, index).map(Outcome::Applied)
    }

    /// Append an option to a voting choice.
    pub fn add_voting_option(
        &mut self,
        scene_id: &str,
        choice_index: usize,
        option: VotingOption,
    ) -> StoryResult<usize> {
        add_voting_option(&mut self.story, scene_id, choice_index, option)
    }

    /// Remove an option from a voting choice.
    pub fn remove_voting_option(
        &mut self,
        scene_id: &str,
        choice_index: usize,
        option_index: usize,
    ) -> StoryResult<Value> {
        remove_voting_option(&mut self.story, scene_id, choice_index, option_index)
    }

    /// Pretty-printed document.
    pub fn export(&self) -> StoryResult<String> {
        self.story.export()
    }

    /// End the session, returning the story.
    pub fn into_story(self) -> Story {
        self.story
    }
}
