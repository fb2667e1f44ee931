//! Question and choice text validation

use crate::config::ValidationConfig;
use crate::error::{PollsError, Result};

/// Validator for question and choice text
pub struct PollValidator {
    max_question_length: usize,
    max_choice_length: usize,
}

impl PollValidator {
    /// Create a validator with default limits
    pub fn new() -> Self {
        Self::from_config(&ValidationConfig::default())
    }

    /// Create a validator from configuration
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            max_question_length: config.max_question_length,
            max_choice_length: config.max_choice_length,
        }
    }

    /// Validate question text, returning it trimmed
    pub fn question_text(&self, text: &str) -> Result<String> {
        check_text("Question", text, self.max_question_length)
    }

    /// Validate choice text, returning it trimmed
    pub fn choice_text(&self, text: &str) -> Result<String> {
        check_text("Choice", text, self.max_choice_length)
    }
}

impl Default for PollValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_text(kind: &str, text: &str, max_length: usize) -> Result<String> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(PollsError::Validation(format!("{} text cannot be empty", kind)));
    }

    if trimmed.chars().count() > max_length {
        return Err(PollsError::Validation(format!(
            "{} text exceeds maximum length of {} characters",
            kind, max_length
        )));
    }

    Ok(trimmed.to_string())
}
