//! Question file format and schema migration

use super::model::Poll;
use crate::error::{PollsError, Result};
use crate::types::ProtocolVersion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// On-disk envelope for one poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionFile {
    /// Schema version for migration
    pub schema_version: String,
    /// The poll data
    pub poll: Poll,
    /// Extra fields for forward compatibility
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl QuestionFile {
    /// Wrap a poll with the current schema version
    pub fn new(poll: Poll) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            poll,
            extra: HashMap::new(),
        }
    }

    /// Get the poll, consuming the file
    pub fn into_poll(self) -> Poll {
        self.poll
    }

    /// Parse schema version
    pub fn parse_version(&self) -> Option<ProtocolVersion> {
        ProtocolVersion::parse(&self.schema_version)
    }
}

/// Question file schema migrator
pub struct PollMigrator;

impl PollMigrator {
    /// Migrate a question file to the current schema version
    pub fn migrate(mut file: QuestionFile) -> Result<QuestionFile> {
        let version = file
            .parse_version()
            .ok_or_else(|| PollsError::UnsupportedSchemaVersion(file.schema_version.clone()))?;

        let current = ProtocolVersion::V1_0;
        if !version.is_compatible(&current) {
            return Err(PollsError::UnsupportedSchemaVersion(format!(
                "{} (expected {}.x)",
                file.schema_version, current.major
            )));
        }

        // 1.x files only ever add optional fields
        file.schema_version = CURRENT_SCHEMA_VERSION.to_string();
        Ok(file)
    }

    /// Check if a file needs migration
    pub fn needs_migration(file: &QuestionFile) -> bool {
        file.schema_version != CURRENT_SCHEMA_VERSION
    }
}
