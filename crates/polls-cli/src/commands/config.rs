//! Config command
//!
//! Manage polls configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;

use polls_core::config::PollsConfig;

use super::Workspace;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, workspace: &Workspace) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(workspace, json),
        ConfigCommand::Reset { force } => reset_config(workspace, force),
        ConfigCommand::Validate => validate_config(workspace),
    }
}

fn show_config(workspace: &Workspace, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = workspace.config_path();
    let config = workspace.load_config()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if config_path.exists() {
        println!("{}", config_path.display().to_string().dimmed());
    } else {
        println!("{}", "(defaults, no config.toml found)".dimmed());
    }
    println!();
    println!("{}", config.to_toml()?);

    Ok(())
}

fn reset_config(workspace: &Workspace, force: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = workspace.config_path();

    if config_path.exists() && !force {
        eprintln!(
            "{} This will overwrite {}. Use --force to proceed.",
            "⚠".yellow(),
            config_path.display()
        );
        return Ok(());
    }

    fs::create_dir_all(&workspace.data_dir)
        .context(format!("Failed to create {}", workspace.data_dir.display()))?;
    fs::write(&config_path, PollsConfig::default().to_toml()?)
        .context(format!("Failed to write {}", config_path.display()))?;
    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}

fn validate_config(workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let config_path = workspace.config_path();

    if !config_path.exists() {
        println!(
            "{} No config.toml in {}, defaults apply.",
            "ℹ".blue(),
            workspace.data_dir.display()
        );
        return Ok(());
    }

    workspace.load_config()?;
    println!("{} Configuration is valid.", "✓".green());

    Ok(())
}
