//! Storyloom command-line tool.

use clap::Parser;
use storyloom::{ConfirmPrompt, StoryloomConfig};
use storyloom::cli::{
    Cli, Commands, handle_delete_scene_command, handle_export_command, handle_graph_command,
    handle_rename_command, handle_validate_command, stdin_confirm,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!(config_file = ?path, "Loading configuration");
            StoryloomConfig::from_file(path)?
        }
        None => StoryloomConfig::default(),
    };

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Validate {
            file,
            format,
            strict,
        } => {
            let status = handle_validate_command(&file, &config, format, strict, &mut stdout)?;
            if status.exit_code() != 0 {
                std::process::exit(status.exit_code());
            }
        }
        Commands::Graph { file } => {
            handle_graph_command(&file, &config, &mut stdout)?;
        }
        Commands::Rename {
            file,
            old,
            new,
            output,
        } => {
            handle_rename_command(&file, &old, &new, output.as_deref(), &config, &mut stdout)?;
        }
        Commands::DeleteScene {
            file,
            id,
            yes,
            output,
        } => {
            let mut confirm = |prompt: &ConfirmPrompt| yes || stdin_confirm(prompt);
            handle_delete_scene_command(
                &file,
                &id,
                output.as_deref(),
                &config,
                &mut confirm,
                &mut stdout,
            )?;
        }
        Commands::Export { file, output } => {
            handle_export_command(&file, output.as_deref(), &mut stdout)?;
        }
    }

    Ok(())
}
