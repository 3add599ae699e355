//! Graph and export command handlers.

use super::{read_story, write_story};
use std::io::Write;
use std::path::Path;
use storyloom_editor::{EditorSession, StoryloomConfig};
use storyloom_error::{IoError, StoryError, StoryErrorKind, StoryloomResult};

/// Handles the graph command: prints the projection as pretty JSON.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn handle_graph_command(
    path: &Path,
    config: &StoryloomConfig,
    out: &mut impl Write,
) -> StoryloomResult<()> {
    let session = EditorSession::new(read_story(path)?, config.clone());
    let projection = session.projection();

    let json = serde_json::to_string_pretty(&projection)
        .map_err(|e| StoryError::new(StoryErrorKind::Serialize(e.to_string())))?;
    writeln!(out, "{}", json).map_err(|e| IoError::new(format!("Failed to write output: {}", e)))?;
    Ok(())
}

/// Handles the export command: re-serializes the story unchanged.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn handle_export_command(
    path: &Path,
    output: Option<&Path>,
    out: &mut impl Write,
) -> StoryloomResult<()> {
    let story = read_story(path)?;
    write_story(&story, output, out)
}
