//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storyloom command-line interface.
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(about = "Validate, inspect and edit branching narrative graphs")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "STORYLOOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a story for dangling references and structural problems
    Validate {
        /// Story JSON file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ValidationOutputFormat::Human)]
        format: ValidationOutputFormat,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Print the node/edge projection as JSON
    Graph {
        /// Story JSON file
        file: PathBuf,
    },

    /// Rename a scene and rewrite every reference to it
    Rename {
        /// Story JSON file
        file: PathBuf,

        /// Current scene id
        old: String,

        /// New scene id
        new: String,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a scene and every choice leading to it
    DeleteScene {
        /// Story JSON file
        file: PathBuf,

        /// Scene id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-serialize a story with 2-space indentation
    Export {
        /// Story JSON file
        file: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Output format for the validate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidationOutputFormat {
    /// Human-readable text
    Human,
    /// JSON for tooling
    Json,
}
