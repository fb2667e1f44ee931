//! Init command
//!
//! Create a polls data directory with a default configuration.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use polls_core::config::{PollsConfig, CONFIG_FILE_NAME};
use polls_storage::FileSystemStorage;

use super::{Workspace, LOCAL_DATA_DIR};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: --data-dir, else ./.polls)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(args: InitArgs, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let data_dir = match (args.path.clone(), workspace.data_dir_explicit) {
        (Some(path), _) => path,
        (None, true) => workspace.data_dir.clone(),
        (None, false) => PathBuf::from(LOCAL_DATA_DIR),
    };
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !args.force {
        eprintln!(
            "{} polls already initialized in {}. Use --force to reinitialize.",
            "⚠".yellow(),
            data_dir.display()
        );
        return Ok(());
    }

    let storage = FileSystemStorage::new(&data_dir)
        .context(format!("Failed to create {}", data_dir.display()))?;
    println!(
        "{} Created {}",
        "✓".green(),
        storage.questions_dir().display()
    );

    let config = PollsConfig::default().to_toml()?;
    fs::write(&config_path, config).context("Failed to write config.toml")?;
    println!("{} Generated {}", "✓".green(), config_path.display());

    println!("\n{}", "Next steps:".bold());
    println!(
        "  {}",
        "polls question add \"What's new?\" --choice \"Not much\" --choice \"The sky\"".cyan()
    );
    println!("  {}", "polls question list".cyan());

    Ok(())
}
