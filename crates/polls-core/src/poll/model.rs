//! Poll data models

use crate::error::{PollsError, Result};
use crate::types::{ChoiceId, QuestionId};
use crate::visibility::{self, Publication};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A poll prompt with a scheduled publication time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    pub id: QuestionId,
    /// Prompt shown to voters
    pub text: String,
    /// When the question becomes visible
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// Create a new question
    pub fn new(id: QuestionId, text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            pub_date,
        }
    }

    /// Whether the question was published within the last day, as of `now`
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        visibility::is_recently_published(self.pub_date, now)
    }

    /// Whether the question can be listed or looked up, as of `now`
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        visibility::is_visible(self.pub_date, now)
    }

    /// Publication state as of `now`
    pub fn publication(&self, now: DateTime<Utc>) -> Publication {
        visibility::classify(self.pub_date, now)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A selectable answer belonging to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Unique choice identifier
    pub id: ChoiceId,
    /// Owning question
    pub question_id: QuestionId,
    /// Answer text
    pub text: String,
    /// Number of votes cast for this choice
    #[serde(default)]
    pub votes: u64,
}

impl Choice {
    /// Create a new choice with no votes
    pub fn new(id: ChoiceId, question_id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            question_id,
            text: text.into(),
            votes: 0,
        }
    }

    /// Record one vote
    pub fn vote(&mut self) -> Result<()> {
        self.votes = self.votes.checked_add(1).ok_or_else(|| {
            PollsError::Validation(format!("Vote count for choice {} overflowed", self.id))
        })?;
        Ok(())
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A question together with the choices it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// The question
    pub question: Question,
    /// Choices in insertion order
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Poll {
    /// Create a poll with no choices
    pub fn new(question: Question) -> Self {
        Self {
            question,
            choices: Vec::new(),
        }
    }

    /// Question ID
    pub fn id(&self) -> QuestionId {
        self.question.id
    }

    /// Attach a choice; it must belong to this question and have a fresh ID
    pub fn add_choice(&mut self, choice: Choice) -> Result<()> {
        if choice.question_id != self.question.id {
            return Err(PollsError::Validation(format!(
                "Choice {} belongs to question {}, not {}",
                choice.id, choice.question_id, self.question.id
            )));
        }
        if self.choice(choice.id).is_some() {
            return Err(PollsError::Validation(format!(
                "Choice with ID {} already exists",
                choice.id
            )));
        }
        self.choices.push(choice);
        Ok(())
    }

    /// Get a choice by ID
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// Get a mutable choice by ID
    pub fn choice_mut(&mut self, id: ChoiceId) -> Option<&mut Choice> {
        self.choices.iter_mut().find(|c| c.id == id)
    }

    /// Highest choice ID in this poll
    pub fn max_choice_id(&self) -> Option<ChoiceId> {
        self.choices.iter().map(|c| c.id).max()
    }

    /// Sum of votes over all choices
    pub fn total_votes(&self) -> u64 {
        self.choices.iter().map(|c| c.votes).sum()
    }

    /// Listing row for this poll, as of `now`
    pub fn summary(&self, now: DateTime<Utc>) -> QuestionSummary {
        QuestionSummary {
            id: self.question.id,
            text: self.question.text.clone(),
            pub_date: self.question.pub_date,
            recently_published: self.question.was_published_recently(now),
            publication: self.question.publication(now),
            choice_count: self.choices.len(),
        }
    }

    /// Vote totals for this poll
    pub fn results(&self) -> PollResults {
        PollResults {
            question: self.question.clone(),
            choices: self.choices.clone(),
            total_votes: self.total_votes(),
        }
    }
}

/// Question summary information (for listing)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    /// Question ID
    pub id: QuestionId,
    /// Question text
    pub text: String,
    /// Publication time
    pub pub_date: DateTime<Utc>,
    /// Published within the last day
    pub recently_published: bool,
    /// Publication state
    pub publication: Publication,
    /// Number of choices
    pub choice_count: usize,
}

/// Vote totals for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResults {
    pub question: Question,
    pub choices: Vec<Choice>,
    pub total_votes: u64,
}

impl PollResults {
    /// Share of all votes that went to `choice`, in percent
    pub fn percentage(&self, choice: &Choice) -> f64 {
        if self.total_votes == 0 {
            return 0.0;
        }
        choice.votes as f64 * 100.0 / self.total_votes as f64
    }
}
