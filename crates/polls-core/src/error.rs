//! Error types for polls

use crate::types::{ChoiceId, QuestionId};
use thiserror::Error;

/// Main error type for polls
#[derive(Debug, Error)]
pub enum PollsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Question unknown, or not yet published
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// Choice does not exist on the given question
    #[error("Choice {choice} not found for question {question}")]
    ChoiceNotFound {
        question: QuestionId,
        choice: ChoiceId,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PollsError>,
    },
}

impl PollsError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PollsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True if this error (or the error it wraps) means "no such question"
    pub fn is_not_found(&self) -> bool {
        match self {
            PollsError::QuestionNotFound(_) => true,
            PollsError::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type alias for polls
pub type Result<T> = std::result::Result<T, PollsError>;
