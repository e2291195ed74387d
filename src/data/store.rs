//! Persistence for the current question set.
//!
//! There is exactly one slot, under the key [`QUESTIONS_KEY`]. Each save
//! overwrites it wholesale. Loading re-validates what was stored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::QuestionSet;

/// Key the question set is stored under.
pub const QUESTIONS_KEY: &str = "questions";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize question set: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The stored data is unreadable or no longer a valid set.
    #[error("stored question set is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Session-scoped repository for the imported question set.
///
/// The importer saves into it and the answering view loads from it; neither
/// knows where the data actually lives.
pub trait QuestionStore {
    fn save(&mut self, set: &QuestionSet) -> Result<(), StoreError>;

    /// `Ok(None)` when nothing has been imported yet.
    fn load(&self) -> Result<Option<QuestionSet>, StoreError>;
}

fn encode(set: &QuestionSet) -> Result<String, StoreError> {
    serde_json::to_string_pretty(set).map_err(StoreError::Serialize)
}

fn decode(raw: &str) -> Result<QuestionSet, StoreError> {
    serde_json::from_str(raw).map_err(StoreError::Corrupt)
}

/// In-memory store holding the serialized form, like a browser's local
/// storage entry.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuestionStore for MemoryStore {
    fn save(&mut self, set: &QuestionSet) -> Result<(), StoreError> {
        self.slot = Some(encode(set)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<QuestionSet>, StoreError> {
        self.slot.as_deref().map(decode).transpose()
    }
}

/// Store backed by `<dir>/questions.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{QUESTIONS_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl QuestionStore for FileStore {
    fn save(&mut self, set: &QuestionSet) -> Result<(), StoreError> {
        let encoded = encode(set)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, encoded).map_err(|e| self.io_error(e))?;

        info!(path = %self.path.display(), questions = set.len(), "question set saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<QuestionSet>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored question set");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };
        decode(&raw).map(Some)
    }
}
