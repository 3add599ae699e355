//! Validation command handler.

use super::{ValidationOutputFormat, read_story};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use storyloom_editor::StoryloomConfig;
use storyloom_error::{IoError, StoryloomResult};
use storyloom_graph::{LintReport, lint_story_with_config};

/// Overall validation result, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// No errors (and no warnings in strict mode)
    Valid,
    /// Warnings found in strict mode
    Warnings,
    /// Errors found
    Invalid,
}

impl ValidationStatus {
    /// Exit code: 0 valid, 1 errors, 2 strict-mode warnings.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidationStatus::Valid => 0,
            ValidationStatus::Invalid => 1,
            ValidationStatus::Warnings => 2,
        }
    }
}

/// Handles the validate command.
///
/// # Arguments
///
/// * `path` - Story JSON file
/// * `config` - Lint and projection settings
/// * `format` - Output format (human or json)
/// * `strict` - Treat warnings as failures
/// * `out` - Where the report is written
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn handle_validate_command(
    path: &Path,
    config: &StoryloomConfig,
    format: ValidationOutputFormat,
    strict: bool,
    out: &mut impl Write,
) -> StoryloomResult<ValidationStatus> {
    tracing::info!("Starting validation");

    let story = read_story(path)?;
    let report = lint_story_with_config(&story, &config.lint, &config.projection);

    let written = match format {
        ValidationOutputFormat::Human => output_human(path, &report, strict, out),
        ValidationOutputFormat::Json => output_json(path, &report, out),
    };
    written.map_err(|e| IoError::new(format!("Failed to write report: {}", e)))?;

    let status = if !report.is_valid() {
        ValidationStatus::Invalid
    } else if strict && !report.warnings.is_empty() {
        ValidationStatus::Warnings
    } else {
        ValidationStatus::Valid
    };
    tracing::info!(
        ?status,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validation finished"
    );
    Ok(status)
}

/// Outputs the report in human-readable format.
fn output_human(
    path: &Path,
    report: &LintReport,
    strict: bool,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let status_icon = if !report.is_valid() {
        "❌"
    } else if !report.warnings.is_empty() {
        if strict { "⚠️" } else { "✅" }
    } else {
        "✅"
    };

    writeln!(out, "\n{} {}", status_icon, path.display())?;
    writeln!(out, "{}", "─".repeat(80))?;

    if !report.errors.is_empty() {
        writeln!(out, "\nErrors:")?;
        for (i, error) in report.errors.iter().enumerate() {
            writeln!(out, "\n  {}. {}", i + 1, error.message)?;
            if let Some(suggestion) = &error.suggestion {
                writeln!(out, "\n     💡 Suggestion:")?;
                for line in suggestion.lines() {
                    writeln!(out, "        {}", line)?;
                }
            }
        }
    }

    if !report.warnings.is_empty() {
        writeln!(out, "\nWarnings:")?;
        for (i, warning) in report.warnings.iter().enumerate() {
            writeln!(out, "\n  {}. {}", i + 1, warning.message)?;
        }
    }

    if report.is_valid() && report.warnings.is_empty() {
        writeln!(out, "\n  No issues found")?;
    }
    Ok(())
}

/// Outputs the report in JSON format.
fn output_json(path: &Path, report: &LintReport, out: &mut impl Write) -> std::io::Result<()> {
    let output = json!({
        "valid": report.is_valid(),
        "file": path.display().to_string(),
        "errors": report.errors,
        "warnings": report.warnings,
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)
}
