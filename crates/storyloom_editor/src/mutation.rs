//! Whole-document mutations.
//!
//! Every operation checks its arguments and prepares everything it writes
//! before touching the story, so an `Err` always leaves the document as it
//! was.

use crate::{ChoiceEdit, EditDefaults};
use serde_json::{Map, Value, json};
use storyloom_core::{CONFIG_KEY, ChoiceRef, DescriptionUpdate, Story, VotingOption};
use storyloom_error::{StoryError, StoryResult};
use tracing::{debug, info, instrument, warn};

/// What a scene deletion removed besides the scene itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct DeleteReport {
    /// Choices removed because they referenced the scene
    removed_choices: usize,
    /// Voting options removed from surviving choices
    stripped_options: usize,
}

/// Rename a scene and rewrite every reference to it.
///
/// Renaming onto another existing scene replaces that scene at its
/// position. `description`, when given, is written to the renamed scene.
///
/// # Errors
///
/// `InvalidArgument` if `old_id` is not a scene, `new_id` is empty or
/// reserved, or a description is given for a scene that is not an object.
#[instrument(skip(story, description, default_color))]
pub fn rename_scene(
    story: &mut Story,
    old_id: &str,
    new_id: &str,
    description: Option<DescriptionUpdate>,
    default_color: &str,
) -> StoryResult<()> {
    let Some(scene) = story.get(old_id) else {
        return Err(missing_scene(old_id));
    };
    if description.is_some() && !scene.value().is_object() {
        return Err(not_an_object(old_id));
    }
    if new_id.is_empty() {
        return Err(StoryError::invalid_argument("scene id cannot be empty"));
    }
    if new_id == CONFIG_KEY {
        return Err(StoryError::invalid_argument(format!(
            "'{}' is reserved and cannot name a scene",
            CONFIG_KEY
        )));
    }

    if new_id != old_id {
        if story.contains(new_id) {
            warn!(old_id, new_id, "Rename overwrites an existing scene");
        }
        if let Some(value) = story.remove_scene(old_id) {
            story.insert_scene(new_id, value)?;
        }

        let mut rewritten = 0;
        for (_, scene) in story.scene_values_mut() {
            for choice in choices_of_mut(scene) {
                rewritten += rewrite_references(choice, old_id, new_id);
            }
        }
        debug!(rewritten, "Rewrote scene references");
    }

    if let Some(update) = description
        && let Some(Value::Object(scene)) = story.scene_value_mut(new_id)
    {
        scene.insert("description".to_string(), update.to_value(default_color));
    }

    info!(old_id, new_id, "Renamed scene");
    Ok(())
}

/// Replace a scene's description with `{"text", "color"}`.
///
/// # Errors
///
/// `InvalidArgument` if `id` is not a scene or the scene is not an object.
#[instrument(skip(story, update, default_color))]
pub fn update_description(
    story: &mut Story,
    id: &str,
    update: DescriptionUpdate,
    default_color: &str,
) -> StoryResult<()> {
    match story.scene_value_mut(id) {
        Some(Value::Object(scene)) => {
            scene.insert("description".to_string(), update.to_value(default_color));
            debug!(id, "Updated description");
            Ok(())
        }
        Some(_) => Err(not_an_object(id)),
        None => Err(missing_scene(id)),
    }
}

/// Delete a scene and every choice that leads to it.
///
/// A choice is removed whole if any of its target fields names `id`, even
/// when it has other valid targets. Voting options naming `id` are then
/// stripped from the choices that remain.
///
/// # Errors
///
/// `InvalidArgument` if `id` is not a scene.
#[instrument(skip(story))]
pub fn delete_scene(story: &mut Story, id: &str) -> StoryResult<DeleteReport> {
    if story.remove_scene(id).is_none() {
        return Err(missing_scene(id));
    }

    let mut report = DeleteReport::default();
    for (_, scene) in story.scene_values_mut() {
        let Some(choices) = scene.get_mut("choices").and_then(Value::as_array_mut) else {
            continue;
        };

        let before = choices.len();
        choices.retain(|choice| !ChoiceRef::new(0, choice).references(id));
        report.removed_choices += before - choices.len();

        for choice in choices.iter_mut() {
            if let Some(options) = voting_options_mut(choice) {
                let before = options.len();
                options.retain(|opt| opt.get("scene").and_then(Value::as_str) != Some(id));
                report.stripped_options += before - options.len();
            }
        }
    }

    info!(
        id,
        removed_choices = report.removed_choices,
        stripped_options = report.stripped_options,
        "Deleted scene"
    );
    Ok(report)
}

/// Append a basic choice with placeholder text and an empty `next_scene`.
///
/// Returns the new choice's index.
///
/// # Errors
///
/// `InvalidArgument` if the scene does not exist, is not an object, or holds
/// a `choices` value that is not a list.
#[instrument(skip(story, placeholder))]
pub fn add_choice(story: &mut Story, scene_id: &str, placeholder: &str) -> StoryResult<usize> {
    let scene = scene_object_mut(story, scene_id)?;

    let has_list = match scene.get("choices") {
        None | Some(Value::Null) => false,
        Some(Value::Array(_)) => true,
        Some(Value::Bool(false)) => false,
        Some(Value::String(s)) if s.is_empty() => false,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => false,
        Some(_) => {
            return Err(StoryError::invalid_argument(format!(
                "choices of scene '{}' is not a list",
                scene_id
            )));
        }
    };
    if !has_list {
        scene.insert("choices".to_string(), Value::Array(Vec::new()));
    }

    let Some(Value::Array(choices)) = scene.get_mut("choices") else {
        return Err(StoryError::invalid_argument(format!(
            "choices of scene '{}' is not a list",
            scene_id
        )));
    };
    choices.push(json!({"text": placeholder, "next_scene": ""}));

    let index = choices.len() - 1;
    debug!(index, "Added choice");
    Ok(index)
}

/// Rewrite a choice from a form edit.
///
/// Every variant field and `effect` is removed, then exactly the edited
/// variant's fields are written, then `effect` if any stat was filled in.
/// Unrelated fields of the choice are kept.
///
/// # Errors
///
/// `InvalidArgument` if the scene does not exist or the choice is not an
/// object; `IndexError` if `index` is out of range.
#[instrument(skip(story, edit, defaults), fields(kind = %edit.kind))]
pub fn edit_choice(
    story: &mut Story,
    scene_id: &str,
    index: usize,
    edit: &ChoiceEdit,
    defaults: &EditDefaults,
) -> StoryResult<()> {
    let Some(scene) = story.get(scene_id) else {
        return Err(missing_scene(scene_id));
    };
    let Some(current) = scene.choice(index) else {
        return Err(choice_index(scene_id, index, scene.choice_count()));
    };

    let variant = edit.to_variant(Some(&current), defaults);
    let effect = edit.to_effect();

    let choice = choice_object_mut(story, scene_id, index)?;
    variant.apply(choice, effect.as_ref())?;
    if let Some(text) = &edit.text {
        choice.insert("text".to_string(), Value::from(text.as_str()));
    }

    info!(index, "Edited choice");
    Ok(())
}

/// Remove the choice at `index`, returning it.
///
/// # Errors
///
/// `InvalidArgument` if the scene does not exist; `IndexError` if `index`
/// is out of range.
#[instrument(skip(story))]
pub fn delete_choice(story: &mut Story, scene_id: &str, index: usize) -> StoryResult<Value> {
    let scene = story
        .scene_value_mut(scene_id)
        .ok_or_else(|| missing_scene(scene_id))?;

    match scene.get_mut("choices").and_then(Value::as_array_mut) {
        Some(choices) if index < choices.len() => {
            let removed = choices.remove(index);
            info!(index, "Deleted choice");
            Ok(removed)
        }
        Some(choices) => Err(choice_index(scene_id, index, choices.len())),
        None => Err(choice_index(scene_id, index, 0)),
    }
}

/// Append an option to a voting choice, returning its index.
///
/// The option is stored as given; incomplete options are dropped the next
/// time the choice is saved through [`edit_choice`].
///
/// # Errors
///
/// `InvalidArgument` if the scene does not exist or the choice is not a
/// voting choice; `IndexError` if `choice_index` is out of range.
#[instrument(skip(story, option))]
pub fn add_voting_option(
    story: &mut Story,
    scene_id: &str,
    choice_index: usize,
    option: VotingOption,
) -> StoryResult<usize> {
    let voting = voting_system_mut(story, scene_id, choice_index)?;

    if !voting.get("options").is_some_and(Value::is_array) {
        voting.insert("options".to_string(), Value::Array(Vec::new()));
    }
    let Some(Value::Array(options)) = voting.get_mut("options") else {
        return Err(StoryError::invalid_argument("voting options are not a list"));
    };
    options.push(json!({"text": option.text(), "scene": option.scene()}));

    let index = options.len() - 1;
    debug!(index, "Added voting option");
    Ok(index)
}

/// Remove the option at `option_index` from a voting choice, returning it.
///
/// # Errors
///
/// `InvalidArgument` if the scene does not exist or the choice is not a
/// voting choice; `IndexError` if either index is out of range.
#[instrument(skip(story))]
pub fn remove_voting_option(
    story: &mut Story,
    scene_id: &str,
    choice_index: usize,
    option_index: usize,
) -> StoryResult<Value> {
    let voting = voting_system_mut(story, scene_id, choice_index)?;

    match voting.get_mut("options").and_then(Value::as_array_mut) {
        Some(options) if option_index < options.len() => {
            let removed = options.remove(option_index);
            debug!(option_index, "Removed voting option");
            Ok(removed)
        }
        Some(options) => Err(option_index_error(scene_id, choice_index, option_index, options.len())),
        None => Err(option_index_error(scene_id, choice_index, option_index, 0)),
    }
}

/// Replace `old_id` with `new_id` in every target field of a choice.
fn rewrite_references(choice: &mut Value, old_id: &str, new_id: &str) -> usize {
    let Some(choice) = choice.as_object_mut() else {
        return 0;
    };

    let mut rewritten = 0;
    let mut rewrite = |slot: Option<&mut Value>| {
        if let Some(slot) = slot
            && slot.as_str() == Some(old_id)
        {
            *slot = Value::from(new_id);
            rewritten += 1;
        }
    };

    rewrite(choice.get_mut("next_scene"));
    rewrite(choice.get_mut("success"));
    rewrite(choice.get_mut("failure"));
    if let Some(options) = choice
        .get_mut("voting_system")
        .and_then(|vs| vs.get_mut("options"))
        .and_then(Value::as_array_mut)
    {
        for option in options {
            rewrite(option.get_mut("scene"));
        }
    }
    if let Some(gate) = choice.get_mut("requires_vote") {
        rewrite(gate.get_mut("success_scene"));
        rewrite(gate.get_mut("failure_scene"));
    }

    rewritten
}

fn choices_of_mut(scene: &mut Value) -> impl Iterator<Item = &mut Value> {
    scene
        .get_mut("choices")
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
}

fn voting_options_mut(choice: &mut Value) -> Option<&mut Vec<Value>> {
    choice
        .get_mut("voting_system")?
        .get_mut("options")?
        .as_array_mut()
}

fn scene_object_mut<'a>(story: &'a mut Story, id: &str) -> StoryResult<&'a mut Map<String, Value>> {
    match story.scene_value_mut(id) {
        Some(Value::Object(scene)) => Ok(scene),
        Some(_) => Err(not_an_object(id)),
        None => Err(missing_scene(id)),
    }
}

fn choice_object_mut<'a>(
    story: &'a mut Story,
    scene_id: &str,
    index: usize,
) -> StoryResult<&'a mut Map<String, Value>> {
    let scene = story
        .scene_value_mut(scene_id)
        .ok_or_else(|| missing_scene(scene_id))?;

    let choices = scene.get_mut("choices").and_then(Value::as_array_mut);
    let len = choices.as_ref().map_or(0, |c| c.len());
    match choices.and_then(|c| c.get_mut(index)) {
        Some(Value::Object(choice)) => Ok(choice),
        Some(_) => Err(StoryError::invalid_argument(format!(
            "choice {} of scene '{}' is not an object",
            index, scene_id
        ))),
        None => Err(choice_index(scene_id, index, len)),
    }
}

fn voting_system_mut<'a>(
    story: &'a mut Story,
    scene_id: &str,
    choice_index: usize,
) -> StoryResult<&'a mut Map<String, Value>> {
    let choice = choice_object_mut(story, scene_id, choice_index)?;
    match choice.get_mut("voting_system") {
        Some(Value::Object(voting)) => Ok(voting),
        _ => Err(StoryError::invalid_argument(format!(
            "choice {} of scene '{}' is not a voting choice",
            choice_index, scene_id
        ))),
    }
}

#[track_caller]
fn missing_scene(id: &str) -> StoryError {
    StoryError::invalid_argument(format!("no scene named '{}'", id))
}

#[track_caller]
fn not_an_object(id: &str) -> StoryError {
    StoryError::invalid_argument(format!("scene '{}' is not an object", id))
}

#[track_caller]
fn choice_index(scene_id: &str, index: usize, len: usize) -> StoryError {
    StoryError::index(format!("choices of scene '{}'", scene_id), index, len)
}

#[track_caller]
fn option_index_error(scene_id: &str, choice_index: usize, index: usize, len: usize) -> StoryError {
    StoryError::index(
        format!("voting options of choice {} in scene '{}'", choice_index, scene_id),
        index,
        len,
    )
}
