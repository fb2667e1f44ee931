//! Poll module
//!
//! Questions, the choices they own, and everything needed to list, look up
//! and vote on them.
//!
//! # Overview
//!
//! A [`Poll`] is the unit of persistence: one [`Question`] plus its
//! [`Choice`]s. The [`PollManager`] is the entry point for callers; it
//! applies the visibility rule from [`crate::visibility`] so that scheduled
//! questions never appear in the index and cannot be looked up or voted on.
//!
//! # Example
//!
//! ```ignore
//! use polls_core::poll::PollManager;
//! use polls_storage::FileSystemStorage;
//!
//! let storage = FileSystemStorage::new(".polls")?;
//! let manager = PollManager::new(storage);
//!
//! let question = manager.create_question("What's up?", chrono::Utc::now())?;
//! manager.add_choice(question.id, "Not much")?;
//!
//! for summary in manager.index()? {
//!     println!("{} {}", summary.id, summary.text);
//! }
//! ```

mod manager;
pub mod migration;
mod model;
mod persistence;
pub mod query;
mod validator;

// Re-export public API
pub use manager::PollManager;
pub use migration::{PollMigrator, QuestionFile, CURRENT_SCHEMA_VERSION};
pub use model::{Choice, Poll, PollResults, Question, QuestionSummary};
pub use persistence::PollStorage;
pub use query::{DateFilter, QuestionQuery};
pub use validator::PollValidator;

// Re-export memory storage for testing
#[cfg(test)]
pub use persistence::memory::MemoryStorage;
