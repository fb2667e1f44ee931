//! Poll storage trait and abstractions

use super::model::Poll;
use crate::error::Result;
use crate::types::QuestionId;

/// Trait for poll storage implementations
///
/// Backends persist whole polls and hand them back unfiltered; visibility
/// and ordering are applied by the caller.
pub trait PollStorage: Send + Sync {
    /// Save a poll, replacing any previous version
    fn save(&self, poll: &Poll) -> Result<()>;

    /// Load a poll by question ID
    fn load(&self, id: &QuestionId) -> Result<Poll>;

    /// List all polls
    fn list(&self) -> Result<Vec<Poll>>;

    /// Check if a poll exists
    fn exists(&self, id: &QuestionId) -> bool;

    /// Number of stored polls
    fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }
}
