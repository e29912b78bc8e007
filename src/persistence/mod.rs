//! High score storage backends
//!
//! The record is a single plain-text non-negative integer. No envelope, no
//! versioning.

use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// Somewhere a high score can be read from and written to
pub trait HighScoreStore {
    fn load(&self) -> Result<u32, PersistenceError>;
    fn save(&mut self, score: u32) -> Result<(), PersistenceError>;
}

/// Plain-text file store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u32, PersistenceError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::Missing);
            }
            Err(e) => return Err(e.into()),
        };
        parse_record(&text)
    }

    fn save(&mut self, score: u32) -> Result<(), PersistenceError> {
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// In-memory store (tests, headless runs without a file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u32>,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, PersistenceError> {
        self.value.ok_or(PersistenceError::Missing)
    }

    fn save(&mut self, score: u32) -> Result<(), PersistenceError> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

fn parse_record(text: &str) -> Result<u32, PersistenceError> {
    let trimmed = text.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| PersistenceError::Corrupt(trimmed.to_string()))
}
