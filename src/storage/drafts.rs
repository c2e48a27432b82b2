//! Per-week draft files.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use super::{StorageConfig, StorageError};
use crate::models::{Draft, WeekId};

/// Reads and writes `drafts/<week>.json`.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: config.drafts_dir(),
        }
    }

    pub fn path_for(&self, week: &WeekId) -> PathBuf {
        self.dir.join(format!("{}.json", week.slug()))
    }

    /// Previously saved draft for `week`, if any.
    pub fn load(&self, week: &WeekId) -> Result<Option<Draft>, StorageError> {
        let path = self.path_for(week);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, week: &WeekId, draft: &Draft) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(week);
        fs::write(&path, serde_json::to_string_pretty(draft)?)?;
        info!("Saved draft for {} to {:?}", week, path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthKey, PlayerId};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn week() -> WeekId {
        WeekId::new(MonthKey::new("2025-03"), 2)
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = DraftStore::new(&StorageConfig::new(temp_dir.path().to_path_buf()));
        assert!(store.load(&week()).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = DraftStore::new(&StorageConfig::new(temp_dir.path().to_path_buf()));
        let draft = Draft {
            red_players: vec![PlayerId::from("A")],
            blue_players: vec![PlayerId::from("B")],
            standby_players: vec![PlayerId::from("C")],
            is_forced_override: true,
        };

        let path = store.save(&week(), &draft).unwrap();
        assert!(path.ends_with("drafts/2025-03-w2.json"));
        assert_eq!(store.load(&week()).unwrap(), Some(draft));
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let store = DraftStore::new(&StorageConfig::new(temp_dir.path().to_path_buf()));
        fs::create_dir_all(temp_dir.path().join("drafts")).unwrap();
        fs::write(store.path_for(&week()), "{ nope").unwrap();

        assert!(matches!(store.load(&week()), Err(StorageError::Json(_))));
    }
}
