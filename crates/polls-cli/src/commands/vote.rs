//! Vote command
//!
//! Cast a vote for one choice of a published question.

use anyhow::Result;
use clap::Args;

use polls_core::types::{ChoiceId, QuestionId};

use super::{parse_choice_id, parse_question_id, Workspace};

/// Arguments for the vote command
#[derive(Debug, Args)]
pub struct VoteArgs {
    /// Question ID
    #[arg(value_parser = parse_question_id)]
    pub question_id: QuestionId,

    /// Choice ID
    #[arg(value_parser = parse_choice_id)]
    pub choice_id: ChoiceId,
}

/// Execute the vote command
pub fn execute(args: VoteArgs, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let manager = workspace.manager()?;
    let choice = manager.vote(args.question_id, args.choice_id)?;

    println!(
        "{} Voted for \"{}\" ({} total)",
        "✓".green(),
        choice,
        choice.votes.to_string().yellow()
    );

    Ok(())
}
