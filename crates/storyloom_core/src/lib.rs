//! Story document model for Storyloom.
//!
//! A story is a JSON object mapping scene ids to scenes, plus an opaque
//! `config` entry. This crate owns the loaded document ([`Story`]),
//! read-only views over its scenes and choices, and the typed
//! [`ChoiceVariant`] the editor writes back.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod choice;
mod scene;
mod story;
mod variant;

pub use choice::{ChoiceRef, Target, TargetField, VotingOptionRef};
pub use scene::{Description, SceneRef};
pub use story::{CONFIG_KEY, Story};
pub use variant::{
    COMBAT_COLORS, ChoiceKind, ChoiceVariant, Combat, DEFAULT_COLOR, DescriptionUpdate, Effect,
    RequiresVote, VARIANT_FIELDS, VotingOption, VotingSystem,
};
