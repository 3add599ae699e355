//! Editing for Storyloom stories.
//!
//! The free functions in this crate are the mutation engine: each takes the
//! story by `&mut` and either applies completely or returns an error without
//! touching it. [`EditorSession`] wraps a story with its configuration,
//! selection and the confirmation step destructive operations need.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod edit;
mod mutation;
mod session;

pub use config::{EditorSettings, NEW_CHOICE_TEXT, StoryloomConfig};
pub use edit::{ChoiceEdit, CombatDefaults, DEFAULT_TIE_BREAKER, EditDefaults, RequiresVoteDefaults};
pub use mutation::{
    DeleteReport, add_choice, add_voting_option, delete_choice, delete_scene, edit_choice,
    remove_voting_option, rename_scene, update_description,
};
pub use session::{Confirm, ConfirmPrompt, EditorSession, Outcome};
