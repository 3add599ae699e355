//! File and terminal access for the CLI.

use std::io::{BufRead, Write};
use std::path::Path;
use storyloom_core::Story;
use storyloom_editor::ConfirmPrompt;
use storyloom_error::{IoError, StoryloomResult};
use tracing::debug;

/// Read and parse a story file.
pub fn read_story(path: &Path) -> StoryloomResult<Story> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| IoError::new(format!("Failed to read {}: {}", path.display(), e)))?;
    let story = Story::load(&raw)?;
    debug!(path = %path.display(), scenes = story.len(), "Read story");
    Ok(story)
}

/// Export `story` to `output`, or to `out` when no path is given.
pub fn write_story(
    story: &Story,
    output: Option<&Path>,
    out: &mut impl Write,
) -> StoryloomResult<()> {
    let exported = story.export()?;
    match output {
        Some(path) => {
            std::fs::write(path, exported + "\n")
                .map_err(|e| IoError::new(format!("Failed to write {}: {}", path.display(), e)))?;
            debug!(path = %path.display(), "Wrote story");
        }
        None => {
            writeln!(out, "{}", exported)
                .map_err(|e| IoError::new(format!("Failed to write output: {}", e)))?;
        }
    }
    Ok(())
}

/// Ask on stderr and read a yes/no answer from stdin.
///
/// Anything but `y` or `yes` declines, as does a read failure.
pub fn stdin_confirm(prompt: &ConfirmPrompt) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
