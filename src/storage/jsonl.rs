//! JSONL (JSON Lines) storage.
//!
//! Fixture history is kept one week per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};
use crate::models::MatchWeekRecord;

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read all entities from the file.
    ///
    /// A missing file reads as empty. Lines that fail to parse are logged
    /// and skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        idx + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Load fixture history, most recent week first.
pub fn read_history(config: &StorageConfig) -> Result<Vec<MatchWeekRecord>, StorageError> {
    let mut weeks = JsonlReader::<MatchWeekRecord>::new(config.history_path()).read_all()?;
    weeks.sort_by(|a, b| b.month.cmp(&a.month).then(b.week.cmp(&a.week)));
    Ok(weeks)
}
