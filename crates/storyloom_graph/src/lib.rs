//! Graph analysis for Storyloom stories.
//!
//! - [`validate`] finds choices that point at scenes which do not exist.
//! - [`project`] turns a story into nodes, edges and detail summaries for
//!   rendering, with synthesized nodes for the missing scenes.
//! - [`lint_story`] reports structural problems with fix suggestions.
//!
//! All three are read-only and recompute from the current document.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod lint;
mod projection;
mod validator;

pub use lint::{
    LintConfig, LintError, LintErrorKind, LintLocation, LintReport, LintWarning, LintWarningKind,
    lint_story, lint_story_with_config,
};
pub use projection::{
    EdgeDedup, INVALID_SCENE_NOTICE, NO_CHOICE_TEXT, Projection, ProjectionConfig,
    ProjectionEdge, ProjectionNode, SceneSummary, project, project_with_config, start_scene_id,
};
pub use validator::{DanglingReference, ReferenceReport, validate};
