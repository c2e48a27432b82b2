//! Per-player aggregate statistics and ranking rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Outcome, PlayerId, RankPolicy};

/// Points credited per outcome for the weighted policies.
pub const POINTS_PER_WIN: u32 = 5;
pub const POINTS_PER_DRAW: u32 = 3;
pub const POINTS_PER_LOSS: u32 = 1;

/// Accumulated results for one player over the history window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub won: u32,
    pub lost: u32,
    pub drawn: u32,
    pub goals_scored: u32,

    /// Scored weeks where the player was tracked but did not line up
    pub games_not_played: u32,

    /// 5 per win, 3 per draw, 1 per loss
    pub weighted_points: u32,
}

impl PlayerStats {
    pub fn games_played(&self) -> u32 {
        self.won + self.lost + self.drawn
    }

    /// Fold one played week into the counters.
    pub fn record(&mut self, outcome: Outcome, goals: u32) {
        match outcome {
            Outcome::Won => {
                self.won += 1;
                self.weighted_points += POINTS_PER_WIN;
            }
            Outcome::Lost => {
                self.lost += 1;
                self.weighted_points += POINTS_PER_LOSS;
            }
            Outcome::Drawn => {
                self.drawn += 1;
                self.weighted_points += POINTS_PER_DRAW;
            }
        }
        self.goals_scored += goals;
    }

    pub fn record_not_played(&mut self) {
        self.games_not_played += 1;
    }
}

/// Stats keyed by player, remembering first-insertion order.
///
/// Ranking ties are broken by insertion order, so iteration order here is
/// part of the observable behaviour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    order: Vec<PlayerId>,
    stats: HashMap<PlayerId, PlayerStats>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `player`, inserting all-zero counters if missing.
    pub fn entry(&mut self, player: &PlayerId) -> &mut PlayerStats {
        if !self.stats.contains_key(player) {
            self.order.push(player.clone());
        }
        self.stats.entry(player.clone()).or_default()
    }

    pub fn get(&self, player: &PlayerId) -> Option<&PlayerStats> {
        self.stats.get(player)
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.stats.contains_key(player)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Players in insertion order.
    pub fn players(&self) -> &[PlayerId] {
        &self.order
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &PlayerStats)> {
        self.order
            .iter()
            .filter_map(|player| self.stats.get(player).map(|stats| (player, stats)))
    }
}

/// A player with their rank value under one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub player: PlayerId,
    pub stats: PlayerStats,
    pub rank_value: f64,

    /// Marked available for the target week
    pub eligible: bool,
}

impl RankedPlayer {
    /// Rank value as shown to people: ratio policies are rounded to 2 dp.
    ///
    /// Ordering always uses the unrounded `rank_value`.
    pub fn display_value(&self, policy: RankPolicy) -> f64 {
        if policy.is_ratio() {
            (self.rank_value * 100.0).round() / 100.0
        } else {
            self.rank_value
        }
    }
}
