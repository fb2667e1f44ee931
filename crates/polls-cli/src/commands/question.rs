//! Question command
//!
//! Create questions, list the index and look up single questions.

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;

use polls_core::poll::{DateFilter, Poll, PollResults, QuestionQuery, QuestionSummary};
use polls_core::types::QuestionId;
use polls_core::visibility::Publication;

use super::{parse_question_id, parse_timestamp, Workspace};

/// Question subcommands
#[derive(Debug, Subcommand)]
pub enum QuestionCommand {
    /// Create a question
    Add {
        /// Question text
        text: String,

        /// Publish this many days from now (negative for the past)
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["hours", "pub_date"])]
        days: Option<i64>,

        /// Publish this many hours from now (negative for the past)
        #[arg(long, allow_negative_numbers = true, conflicts_with = "pub_date")]
        hours: Option<i64>,

        /// Exact publication time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        pub_date: Option<DateTime<Utc>>,

        /// Choice to attach (repeatable)
        #[arg(long = "choice", value_name = "TEXT")]
        choices: Vec<String>,
    },

    /// List published questions, latest first
    List {
        /// Include scheduled questions (administrative view)
        #[arg(long)]
        all: bool,

        /// Only questions whose text contains this
        #[arg(long, short)]
        search: Option<String>,

        /// Publication date filter: any, today, past-7-days, this-month, this-year
        #[arg(long, value_parser = parse_date_filter)]
        published: Option<DateFilter>,

        /// Maximum number of questions (index default: index.latest_limit, if set)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a published question and its choices
    Show {
        /// Question ID
        #[arg(value_parser = parse_question_id)]
        id: QuestionId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show vote totals for a published question
    Results {
        /// Question ID
        #[arg(value_parser = parse_question_id)]
        id: QuestionId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the question command
pub fn execute(cmd: QuestionCommand, workspace: &Workspace) -> Result<()> {
    match cmd {
        QuestionCommand::Add {
            text,
            days,
            hours,
            pub_date,
            choices,
        } => add_question(workspace, &text, days, hours, pub_date, &choices),
        QuestionCommand::List {
            all,
            search,
            published,
            limit,
            json,
        } => list_questions(workspace, all, search, published, limit, json),
        QuestionCommand::Show { id, json } => show_question(workspace, id, json),
        QuestionCommand::Results { id, json } => show_results(workspace, id, json),
    }
}

fn add_question(
    workspace: &Workspace,
    text: &str,
    days: Option<i64>,
    hours: Option<i64>,
    pub_date: Option<DateTime<Utc>>,
    choices: &[String],
) -> Result<()> {
    use colored::Colorize;

    let manager = workspace.manager()?;
    let now = manager.now();
    let pub_date = match pub_date {
        Some(at) => at,
        None => offset_from(now, days, hours)?,
    };

    let question = manager.create_question(text, pub_date)?;
    println!(
        "{} Created question {}: {}",
        "✓".green(),
        question.id.to_string().cyan(),
        question
    );

    for text in choices {
        let choice = manager.add_choice(question.id, text)?;
        println!("  {} choice {}: {}", "+".green(), choice.id.to_string().cyan(), choice);
    }

    if !question.is_visible(now) {
        println!(
            "  {} Scheduled for {}",
            "ℹ".blue(),
            format_date(question.pub_date, &manager.config().display.date_format)
        );
    }

    Ok(())
}

/// Publication time relative to `now`, or `now` itself without an offset
fn offset_from(
    now: DateTime<Utc>,
    days: Option<i64>,
    hours: Option<i64>,
) -> Result<DateTime<Utc>> {
    let (offset, flag) = match (days, hours) {
        (Some(days), _) => (Duration::try_days(days), "--days"),
        (None, Some(hours)) => (Duration::try_hours(hours), "--hours"),
        (None, None) => return Ok(now),
    };
    match offset.and_then(|offset| now.checked_add_signed(offset)) {
        Some(at) => Ok(at),
        None => bail!("{} is out of range", flag),
    }
}

fn list_questions(
    workspace: &Workspace,
    all: bool,
    search: Option<String>,
    published: Option<DateFilter>,
    limit: Option<usize>,
    as_json: bool,
) -> Result<()> {
    use colored::Colorize;

    let manager = workspace.manager()?;
    let admin_view = all || search.is_some() || published.is_some();

    let summaries = if admin_view {
        let now = manager.now();
        let mut query = QuestionQuery::new().published(published.unwrap_or_default(), now);
        if !all {
            query = query.visible_at(now);
        }
        if let Some(text) = search {
            query = query.with_text(text);
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        manager.search(&query)?
    } else {
        match limit {
            Some(limit) => {
                manager.search(&QuestionQuery::new().visible_at(manager.now()).limit(limit))?
            }
            None => manager.index()?,
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No polls are available.");
        return Ok(());
    }

    let date_format = &manager.config().display.date_format;
    for summary in &summaries {
        println!("{}", format_summary(summary, date_format));
    }

    if !admin_view {
        let visible = manager
            .search(&QuestionQuery::new().visible_at(manager.now()))?
            .len();
        if visible > summaries.len() {
            println!(
                "\n  {} {} of {} published questions shown. Use --limit to show more.",
                "ℹ".blue(),
                summaries.len(),
                visible
            );
        }
    }

    Ok(())
}

fn show_question(workspace: &Workspace, id: QuestionId, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let manager = workspace.manager()?;
    let poll = manager.detail(id)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&poll)?);
        return Ok(());
    }

    print_question_header(&poll, &manager.config().display.date_format, manager.now());

    if poll.choices.is_empty() {
        println!("  {}", "No choices yet.".dimmed());
    }
    for choice in &poll.choices {
        println!("  [{}] {}", choice.id.to_string().cyan(), choice);
    }

    Ok(())
}

fn show_results(workspace: &Workspace, id: QuestionId, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let manager = workspace.manager()?;
    let results = manager.results(id)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{}", results.question.text.bold().underline());
    println!();
    for line in format_results(&results) {
        println!("{}", line);
    }
    println!();
    println!("  Total: {}", results.total_votes.to_string().yellow());

    Ok(())
}

fn print_question_header(poll: &Poll, date_format: &str, now: DateTime<Utc>) {
    use colored::Colorize;

    println!("{}", poll.question.text.bold().underline());
    println!(
        "  ID: {}  Published: {}{}",
        poll.id().to_string().cyan(),
        format_date(poll.question.pub_date, date_format),
        if poll.question.was_published_recently(now) {
            format!(" {}", "(new)".green())
        } else {
            String::new()
        }
    );
    println!();
}

fn format_summary(summary: &QuestionSummary, date_format: &str) -> String {
    use colored::Colorize;

    let marker = match summary.publication {
        Publication::Recent => "new".green().to_string(),
        Publication::Scheduled => "scheduled".yellow().to_string(),
        Publication::Published => String::new(),
    };

    format!(
        "  {}  {}  {}  {}",
        format!("{:>4}", summary.id.0).cyan(),
        summary.text,
        format_date(summary.pub_date, date_format).dimmed(),
        marker
    )
    .trim_end()
    .to_string()
}

fn format_results(results: &PollResults) -> Vec<String> {
    results
        .choices
        .iter()
        .map(|choice| {
            let plural = if choice.votes == 1 { "vote" } else { "votes" };
            format!(
                "  {} -- {} {} ({:.1}%)",
                choice.text,
                choice.votes,
                plural,
                results.percentage(choice)
            )
        })
        .collect()
}

fn format_date(date: DateTime<Utc>, format: &str) -> String {
    date.format(format).to_string()
}

fn parse_date_filter(s: &str) -> std::result::Result<DateFilter, String> {
    s.parse().map_err(|e: polls_core::PollsError| e.to_string())
}
