//! Command-line interface module.
//!
//! Command definitions and handlers for the storyloom binary. Handlers write
//! their normal output to the sink they are given; file access lives in
//! [`read_story`] and [`write_story`].

mod commands;
mod edit;
mod graph;
mod io;
mod validate;

pub use commands::{Cli, Commands, ValidationOutputFormat};
pub use edit::{handle_delete_scene_command, handle_rename_command};
pub use graph::{handle_export_command, handle_graph_command};
pub use io::{read_story, stdin_confirm, write_story};
pub use validate::{ValidationStatus, handle_validate_command};
