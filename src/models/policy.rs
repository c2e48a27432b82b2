//! Named ranking policies.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a policy name does not match any known policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ranking policy: {0}")]
pub struct UnknownPolicy(pub String);

/// Scoring formula used to order players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RankPolicy {
    /// Uniform random value in [0, 1)
    Random,
    /// won / played
    #[default]
    WinRatio,
    /// (won + drawn) / played
    WinOrDrawRatio,
    /// weighted points / played
    AvgWeightedPoints,
    /// weighted points
    TotalWeightedPoints,
    /// played
    GamesPlayedCount,
    /// goals / played
    GoalsPerGame,
}

impl RankPolicy {
    pub const ALL: [RankPolicy; 7] = [
        RankPolicy::Random,
        RankPolicy::WinRatio,
        RankPolicy::WinOrDrawRatio,
        RankPolicy::AvgWeightedPoints,
        RankPolicy::TotalWeightedPoints,
        RankPolicy::GamesPlayedCount,
        RankPolicy::GoalsPerGame,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RankPolicy::Random => "random",
            RankPolicy::WinRatio => "winRatio",
            RankPolicy::WinOrDrawRatio => "winOrDrawRatio",
            RankPolicy::AvgWeightedPoints => "avgWeightedPoints",
            RankPolicy::TotalWeightedPoints => "totalWeightedPoints",
            RankPolicy::GamesPlayedCount => "gamesPlayedCount",
            RankPolicy::GoalsPerGame => "goalsPerGame",
        }
    }

    /// Value given to players without enough games for a meaningful sample.
    pub fn new_player_default(&self) -> f64 {
        match self {
            RankPolicy::Random
            | RankPolicy::WinRatio
            | RankPolicy::WinOrDrawRatio
            | RankPolicy::AvgWeightedPoints => 0.5,
            RankPolicy::TotalWeightedPoints => 2.0,
            RankPolicy::GamesPlayedCount | RankPolicy::GoalsPerGame => 0.0,
        }
    }

    /// Fractional policies, shown rounded to 2 dp.
    pub fn is_ratio(&self) -> bool {
        matches!(
            self,
            RankPolicy::Random
                | RankPolicy::WinRatio
                | RankPolicy::WinOrDrawRatio
                | RankPolicy::AvgWeightedPoints
                | RankPolicy::GoalsPerGame
        )
    }
}

impl FromStr for RankPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RankPolicy::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

impl std::fmt::Display for RankPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
