//! Alias table and availability lists.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};
use crate::alias::{AliasResolver, InMemoryAliasResolver};
use crate::models::{MatchWeekRecord, WeekId};

/// On-disk alias table.
///
/// ```toml
/// players = ["Alice", "Robert"]
///
/// [aliases]
/// bob = "Robert"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasFile {
    #[serde(default)]
    pub players: Vec<String>,

    /// alias -> canonical name
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl AliasFile {
    pub fn into_resolver(self) -> InMemoryAliasResolver {
        let mut resolver = InMemoryAliasResolver::new();
        for player in &self.players {
            resolver.add_player(player);
        }
        for (alias, canonical) in &self.aliases {
            resolver.add_alias(alias, canonical);
        }
        resolver
    }
}

/// Build a resolver from the alias file plus everyone named in `history`.
///
/// Players already recorded in history resolve to themselves unless the alias
/// file already maps that spelling. A missing alias file is treated as empty.
pub fn load_aliases(
    config: &StorageConfig,
    history: &[MatchWeekRecord],
) -> Result<InMemoryAliasResolver, StorageError> {
    let path = config.aliases_path();
    let file = if path.exists() {
        toml::from_str::<AliasFile>(&fs::read_to_string(&path)?)?
    } else {
        warn!("No alias table at {:?}; only known players will resolve", path);
        AliasFile::default()
    };

    let mut resolver = file.into_resolver();
    for week in history {
        for (player, _) in week.entries() {
            if resolver.resolve(player.as_str()).is_none() {
                resolver.add_player(player.as_str());
            }
        }
    }

    debug!("Alias table holds {} names", resolver.len());
    Ok(resolver)
}

/// Default availability list location for `week`.
pub fn availability_path(config: &StorageConfig, week: &WeekId) -> PathBuf {
    config.availability_dir().join(format!("{}.txt", week.slug()))
}

/// Raw names, one per line. Blank lines and `#` comments are ignored.
pub fn read_availability(path: &Path) -> Result<Vec<String>, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let names = fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthKey, PlayerId};
    use tempfile::TempDir;

    #[test]
    fn test_load_aliases_merges_file_and_history() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        fs::write(
            config.aliases_path(),
            "players = [\"Alice\"]\n\n[aliases]\nbob = \"Robert\"\n",
        )
        .unwrap();

        let history =
            vec![MatchWeekRecord::new(MonthKey::new("2025-01"), 1).with_side("Cara", 2)];
        let resolver = load_aliases(&config, &history).unwrap();

        assert_eq!(resolver.resolve("alice"), Some(PlayerId::from("Alice")));
        assert_eq!(resolver.resolve("Bob"), Some(PlayerId::from("Robert")));
        assert_eq!(resolver.resolve("robert"), Some(PlayerId::from("Robert")));
        assert_eq!(resolver.resolve("CARA"), Some(PlayerId::from("Cara")));
        assert_eq!(resolver.resolve("Dan"), None);
    }

    #[test]
    fn test_history_name_does_not_override_alias() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        fs::write(config.aliases_path(), "[aliases]\nbob = \"Robert\"\n").unwrap();

        let history = vec![MatchWeekRecord::new(MonthKey::new("2025-01"), 1)
            .with_side("Bob", 1)
            .with_side("Robert", 2)];
        let resolver = load_aliases(&config, &history).unwrap();

        assert_eq!(resolver.resolve("Bob"), Some(PlayerId::from("Robert")));
        assert_eq!(resolver.resolve("robert"), Some(PlayerId::from("Robert")));
    }

    #[test]
    fn test_load_aliases_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let resolver = load_aliases(&config, &[]).unwrap();
        assert!(resolver.is_empty());
    }

    #[test]
    fn test_read_availability() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("week.txt");
        fs::write(&path, "# poll export\nAlice\n\n  bob  \n").unwrap();

        assert_eq!(read_availability(&path).unwrap(), vec!["Alice", "bob"]);
    }

    #[test]
    fn test_read_availability_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        assert!(matches!(
            read_availability(&path),
            Err(StorageError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_availability_path() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        let week = WeekId::new(MonthKey::new("2025-03"), 1);
        assert_eq!(
            availability_path(&config, &week),
            PathBuf::from("/data/availability/2025-03-w1.txt")
        );
    }
}
