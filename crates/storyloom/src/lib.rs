//! Storyloom: branching narrative graphs.
//!
//! A story is a JSON document of scenes whose choices point at other scenes
//! by id. This crate gathers the workspace into one API:
//!
//! - [`Story`] loads and exports documents losslessly
//! - [`validate`] and [`project`] turn a story into a renderable graph,
//!   synthesizing nodes for referenced scenes that do not exist
//! - [`lint_story`] reports structural problems with suggestions
//! - the mutation functions and [`EditorSession`] edit a story in place
//!
//! # Examples
//!
//! ```
//! use storyloom::{Story, project, rename_scene, validate};
//!
//! let mut story = Story::load(r#"{
//!     "start": {"choices": [{"text": "Go", "next_scene": "end"}]},
//!     "end": {"choices": []}
//! }"#)?;
//!
//! rename_scene(&mut story, "end", "finale", None, "white")?;
//! let projection = project(&story, &validate(&story));
//! assert_eq!(projection.edges()[0].target(), "finale");
//! # Ok::<(), storyloom::StoryError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;

pub use storyloom_core::*;
pub use storyloom_editor::*;
pub use storyloom_error::*;
pub use storyloom_graph::*;
