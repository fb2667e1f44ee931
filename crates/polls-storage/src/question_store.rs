//! File system storage for polls

use polls_core::error::{PollsError, Result};
use polls_core::poll::{Poll, PollMigrator, PollStorage, QuestionFile, CURRENT_SCHEMA_VERSION};
use polls_core::types::QuestionId;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File system based poll storage, one JSON file per question
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Questions subdirectory
    questions_dir: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let questions_dir = base_dir.join("questions");

        let storage = Self {
            base_dir,
            questions_dir,
        };

        storage.ensure_dirs()?;
        Ok(storage)
    }

    /// Create storage in the platform data directory (falls back to ~/.polls)
    pub fn default_location() -> Result<Self> {
        Self::new(Self::default_dir())
    }

    /// Platform data directory used by `default_location`
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("rs", "polls", "polls")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".polls")
            })
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.questions_dir.exists() {
            fs::create_dir_all(&self.questions_dir).map_err(|e| {
                PollsError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create questions directory: {}", e),
                ))
            })?;
            debug!("Created questions directory: {:?}", self.questions_dir);
        }
        Ok(())
    }

    /// Get the path for a question file
    fn question_path(&self, id: &QuestionId) -> PathBuf {
        self.questions_dir.join(format!("{}.json", id))
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, id: &QuestionId) -> PathBuf {
        self.questions_dir.join(format!(".{}.json.tmp", id))
    }

    /// Write poll atomically (write to temp, then rename)
    fn atomic_write(&self, poll: &Poll) -> Result<()> {
        let id = poll.id();
        let temp_path = self.temp_path(&id);
        let final_path = self.question_path(&id);

        let file = QuestionFile::new(poll.clone());

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            PollsError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PollsError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved question {} to {:?}", id, final_path);
        Ok(())
    }

    /// Read and parse a question file
    fn read_poll(&self, id: Option<&QuestionId>, path: &Path) -> Result<Poll> {
        let file = fs::File::open(path).map_err(|e| match (e.kind(), id) {
            (std::io::ErrorKind::NotFound, Some(id)) => PollsError::QuestionNotFound(*id),
            _ => PollsError::Io(e),
        })?;

        let reader = BufReader::new(file);
        let question_file: QuestionFile = serde_json::from_reader(reader)?;

        let migrated = if PollMigrator::needs_migration(&question_file) {
            info!(
                "Migrating {:?} from schema {} to {}",
                path, question_file.schema_version, CURRENT_SCHEMA_VERSION
            );
            PollMigrator::migrate(question_file)?
        } else {
            question_file
        };

        Ok(migrated.into_poll())
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get questions directory
    pub fn questions_dir(&self) -> &PathBuf {
        &self.questions_dir
    }
}

impl PollStorage for FileSystemStorage {
    fn save(&self, poll: &Poll) -> Result<()> {
        self.atomic_write(poll)
    }

    fn load(&self, id: &QuestionId) -> Result<Poll> {
        let path = self.question_path(id);
        let poll = self.read_poll(Some(id), &path)?;
        if poll.id() != *id {
            return Err(PollsError::Validation(format!(
                "File {:?} holds question {}, expected {}",
                path,
                poll.id(),
                id
            )));
        }
        Ok(poll)
    }

    fn list(&self) -> Result<Vec<Poll>> {
        let mut polls = Vec::new();

        let entries = fs::read_dir(&self.questions_dir).map_err(|e| {
            PollsError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read questions directory: {}", e),
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip non-json files and temp files
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            match self.read_poll(None, &path) {
                Ok(poll) => polls.push(poll),
                Err(e) => {
                    warn!("Failed to read question file {:?}: {}", path, e);
                }
            }
        }

        Ok(polls)
    }

    fn exists(&self, id: &QuestionId) -> bool {
        self.question_path(id).exists()
    }
}
