//! polls-core - Core library for polls
//!
//! This crate provides the business logic for the polls application:
//! question visibility and recency rules, choices and voting, the query
//! abstraction used for listings, and the storage trait backends implement.

pub mod clock;
pub mod config;
pub mod error;
pub mod poll;
pub mod types;
pub mod visibility;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{PollsError, Result};
pub use types::*;
