//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod choice;
pub mod config;
pub mod init;
pub mod question;
pub mod vote;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use polls_core::config::{PollsConfig, CONFIG_FILE_NAME};
use polls_core::poll::PollManager;
use polls_core::types::{ChoiceId, QuestionId};
use polls_core::FixedClock;
use polls_storage::FileSystemStorage;

/// Directory looked up in the current directory when --data-dir is not given
pub const LOCAL_DATA_DIR: &str = ".polls";

/// polls - publish questions and collect votes
#[derive(Debug, Parser)]
#[command(name = "polls")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Data directory (default: ./.polls if present, else the platform data dir)
    #[arg(long, global = true, env = "POLLS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Evaluate visibility as of this RFC 3339 timestamp instead of now
    #[arg(long, global = true, value_parser = parse_timestamp)]
    pub as_of: Option<DateTime<Utc>>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a polls data directory
    Init(init::InitArgs),

    /// Create, list and inspect questions
    #[command(subcommand)]
    Question(question::QuestionCommand),

    /// Manage choices
    #[command(subcommand)]
    Choice(choice::ChoiceCommand),

    /// Vote for a choice on a published question
    Vote(vote::VoteArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Resolved data directory and clock override shared by all commands
#[derive(Debug, Clone)]
pub struct Workspace {
    pub data_dir: PathBuf,
    /// Set when the directory came from --data-dir or POLLS_DATA_DIR
    pub data_dir_explicit: bool,
    pub as_of: Option<DateTime<Utc>>,
}

impl Workspace {
    fn from_cli(cli: &Cli) -> Self {
        let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
            let local = PathBuf::from(LOCAL_DATA_DIR);
            if local.exists() {
                local
            } else {
                FileSystemStorage::default_dir()
            }
        });

        Self {
            data_dir,
            data_dir_explicit: cli.data_dir.is_some(),
            as_of: cli.as_of,
        }
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    /// Load configuration, defaults if the file is missing
    pub fn load_config(&self) -> Result<PollsConfig> {
        let path = self.config_path();
        PollsConfig::load(&path).context(format!("Invalid configuration in {}", path.display()))
    }

    /// Open storage and build a manager with the configured clock
    pub fn manager(&self) -> Result<PollManager> {
        let config = self.load_config()?;
        let storage = FileSystemStorage::new(&self.data_dir).context(format!(
            "Failed to open data directory {}",
            self.data_dir.display()
        ))?;
        tracing::debug!("Using data directory {:?}", self.data_dir);

        let manager = PollManager::new(storage).with_config(config);
        Ok(match self.as_of {
            Some(at) => manager.with_clock(FixedClock::new(at)),
            None => manager,
        })
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let workspace = Workspace::from_cli(&cli);

    // Dispatch to command handler
    match cli.command {
        Commands::Init(args) => init::execute(args, &workspace),
        Commands::Question(cmd) => question::execute(cmd, &workspace),
        Commands::Choice(cmd) => choice::execute(cmd, &workspace),
        Commands::Vote(args) => vote::execute(args, &workspace),
        Commands::Config(cmd) => config::execute(cmd, &workspace),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp like 2024-06-15T09:30:00Z: {}", e))
}

/// Parse a question ID argument
pub fn parse_question_id(s: &str) -> std::result::Result<QuestionId, String> {
    s.parse().map_err(|e: polls_core::PollsError| e.to_string())
}

/// Parse a choice ID argument
pub fn parse_choice_id(s: &str) -> std::result::Result<ChoiceId, String> {
    s.parse().map_err(|e: polls_core::PollsError| e.to_string())
}
