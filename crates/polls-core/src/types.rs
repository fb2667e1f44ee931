//! Core type definitions for polls

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a question
///
/// Allocated in insertion order, so comparing ids compares creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

impl QuestionId {
    /// The id that follows this one, `None` once the id space is exhausted
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(QuestionId)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = crate::PollsError;

    fn from_str(s: &str) -> crate::Result<Self> {
        parse_id(s, "question").map(QuestionId)
    }
}

/// Unique identifier for a choice, across all questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub u64);

impl ChoiceId {
    /// The id that follows this one, `None` once the id space is exhausted
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(ChoiceId)
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChoiceId {
    type Err = crate::PollsError;

    fn from_str(s: &str) -> crate::Result<Self> {
        parse_id(s, "choice").map(ChoiceId)
    }
}

fn parse_id(s: &str, kind: &str) -> crate::Result<u64> {
    match s.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(crate::PollsError::Validation(format!(
            "Invalid {} ID: {}",
            kind, s
        ))),
        Ok(n) => Ok(n),
    }
}

/// Protocol version for compatibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    pub const V1_0: Self = Self { major: 1, minor: 0 };

    /// Check if this version is compatible with another version
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.major == other.major
    }

    /// Parse a "major.minor" string
    pub fn parse(s: &str) -> Option<Self> {
        let (major, minor) = s.split_once('.')?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V1_0
    }
}
