//! Choice command
//!
//! Attach choices to questions.

use anyhow::Result;
use clap::Subcommand;

use polls_core::types::QuestionId;

use super::{parse_question_id, Workspace};

/// Choice subcommands
#[derive(Debug, Subcommand)]
pub enum ChoiceCommand {
    /// Add a choice to a question (scheduled questions included)
    Add {
        /// Question ID
        #[arg(value_parser = parse_question_id)]
        question_id: QuestionId,

        /// Choice text
        text: String,
    },
}

/// Execute the choice command
pub fn execute(cmd: ChoiceCommand, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    match cmd {
        ChoiceCommand::Add { question_id, text } => {
            let manager = workspace.manager()?;
            let choice = manager.add_choice(question_id, &text)?;
            println!(
                "{} Added choice {} to question {}: {}",
                "✓".green(),
                choice.id.to_string().cyan(),
                question_id,
                choice
            );
            Ok(())
        }
    }
}

