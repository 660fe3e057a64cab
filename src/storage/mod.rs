//! Filesystem persistence for sessions and records.
//!
//! JSONL files under the data directory are the source of truth:
//! - `sessions.jsonl` holds one training session per line
//! - `records.jsonl` holds one athlete stat line per line

use std::path::PathBuf;
use thiserror::Error;

pub mod jsonl;

pub use jsonl::{EntityType, JsonlReader, JsonlWriter};

use crate::models::{AthleteSessionRecord, TrainingSession};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.data_dir.join(EntityType::Session.filename())
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(EntityType::Record.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Read all sessions, generating IDs for any that the export lacked.
pub fn load_sessions(config: &StorageConfig) -> Result<Vec<TrainingSession>, StorageError> {
    let reader = JsonlReader::new(config.sessions_path());
    let mut sessions: Vec<TrainingSession> = reader.read_all()?;
    for session in &mut sessions {
        session.ensure_id();
    }
    Ok(sessions)
}

/// Read all athlete session records.
pub fn load_records(config: &StorageConfig) -> Result<Vec<AthleteSessionRecord>, StorageError> {
    let reader = JsonlReader::new(config.records_path());
    reader.read_all()
}

/// Write sessions, replacing the file, sorted chronologically.
pub fn write_sessions(
    config: &StorageConfig,
    sessions: &mut [TrainingSession],
) -> Result<usize, StorageError> {
    sessions.sort_by_key(|s| (s.session_date.is_none(), s.session_date));
    let writer = JsonlWriter::new(config.sessions_path());
    writer.write_all(sessions)
}

/// Write records, replacing the file.
pub fn write_records(
    config: &StorageConfig,
    records: &[AthleteSessionRecord],
) -> Result<usize, StorageError> {
    let writer = JsonlWriter::new(config.records_path());
    writer.write_all(records)
}
