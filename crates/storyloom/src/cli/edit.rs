//! Rename and delete command handlers.

use super::{read_story, write_story};
use std::io::Write;
use std::path::Path;
use storyloom_editor::{Confirm, EditorSession, Outcome, StoryloomConfig};
use storyloom_error::StoryloomResult;
use tracing::{info, instrument};

/// Handles the rename command.
///
/// Writes the edited story to `output`, or to `out` when no path is given.
#[instrument(skip_all, fields(path = %path.display(), old = %old, new = %new))]
pub fn handle_rename_command(
    path: &Path,
    old: &str,
    new: &str,
    output: Option<&Path>,
    config: &StoryloomConfig,
    out: &mut impl Write,
) -> StoryloomResult<()> {
    let mut session = EditorSession::new(read_story(path)?, config.clone());
    session.rename_scene(old, new, None)?;
    write_story(session.story(), output, out)
}

/// Handles the delete-scene command.
///
/// Returns false, without writing anything, if the deletion was declined.
#[instrument(skip_all, fields(path = %path.display(), id = %id))]
pub fn handle_delete_scene_command(
    path: &Path,
    id: &str,
    output: Option<&Path>,
    config: &StoryloomConfig,
    confirm: &mut impl Confirm,
    out: &mut impl Write,
) -> StoryloomResult<bool> {
    let mut session = EditorSession::new(read_story(path)?, config.clone());

    match session.delete_scene(id, confirm)? {
        Outcome::Applied(report) => {
            info!(
                removed_choices = report.removed_choices(),
                "Scene deleted"
            );
            write_story(session.story(), output, out)?;
            Ok(true)
        }
        Outcome::Declined => {
            info!("Deletion cancelled");
            Ok(false)
        }
    }
}
