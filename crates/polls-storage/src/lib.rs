//! polls-storage - Storage library for polls
//!
//! This crate provides storage implementations for polls.

mod question_store;

pub use question_store::FileSystemStorage;
