//! Team sheet produced by one generation run.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::PlayerId;

/// Red, blue and standby lists for one fixture week.
///
/// The three lists partition the week's eligible players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub red_players: Vec<PlayerId>,
    pub blue_players: Vec<PlayerId>,
    pub standby_players: Vec<PlayerId>,

    /// An administrator override put at least one player on standby
    #[serde(default)]
    pub is_forced_override: bool,
}

impl Draft {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Everyone on the sheet: red, then blue, then standby.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.red_players
            .iter()
            .chain(self.blue_players.iter())
            .chain(self.standby_players.iter())
    }

    pub fn seated(&self) -> usize {
        self.red_players.len() + self.blue_players.len()
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players().any(|p| p == player)
    }

    /// True when the sheet covers exactly `eligible`, each player once.
    pub fn is_partition_of(&self, eligible: &[PlayerId]) -> bool {
        let mut seen = HashSet::new();
        if !self.players().all(|p| seen.insert(p)) {
            return false;
        }
        let wanted: HashSet<&PlayerId> = eligible.iter().collect();
        seen == wanted
    }

    /// One-line count summary for notifications.
    pub fn summary(&self) -> String {
        format!(
            "{} red, {} blue, {} standby",
            self.red_players.len(),
            self.blue_players.len(),
            self.standby_players.len()
        )
    }

    /// SHA-256 over list contents and order.
    ///
    /// Two drafts share a fingerprint only if a published sheet would read
    /// identically.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (label, list) in [
            ("red", &self.red_players),
            ("blue", &self.blue_players),
            ("standby", &self.standby_players),
        ] {
            hasher.update(label.as_bytes());
            for player in list {
                hasher.update(b"|");
                hasher.update(player.as_str().as_bytes());
            }
            hasher.update(b";");
        }
        hasher.update([u8::from(self.is_forced_override)]);
        hex::encode(hasher.finalize())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, label: &str, players: &[PlayerId]) -> fmt::Result {
    let names: Vec<&str> = players.iter().map(|p| p.as_str()).collect();
    writeln!(f, "{:<8} ({}): {}", label, players.len(), names.join(", "))
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, "Red", &self.red_players)?;
        write_list(f, "Blue", &self.blue_players)?;
        write_list(f, "Standby", &self.standby_players)
    }
}
