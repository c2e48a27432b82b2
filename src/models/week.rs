//! Historical match week records.
//!
//! These are read-only inputs owned by the persistence layer. A week without
//! a score has not been played yet and does not count toward statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MonthKey, PlayerId, WeekId};

/// Legacy side-map key that carried the score inline.
pub const RESERVED_SCORES_KEY: &str = "scores";

/// One of the two sides in a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Side 1
    Red,
    /// Side 2
    Blue,
}

impl Side {
    /// Decode the stored side number. Anything other than 1 or 2 is malformed.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Side::Red),
            2 => Some(Side::Blue),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Side::Red => 1,
            Side::Blue => 2,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Blue => write!(f, "blue"),
        }
    }
}

/// Result of a scored week from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Drawn,
}

/// Final score of a played week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub team1_goals: u32,
    pub team2_goals: u32,

    /// 0 for a draw, otherwise the winning side number
    pub winner: u8,

    /// Goals per scorer, keyed by side number
    #[serde(default)]
    pub scorers_by_side: BTreeMap<u8, BTreeMap<PlayerId, u32>>,
}

impl ScoreRecord {
    pub fn new(team1_goals: u32, team2_goals: u32, winner: u8) -> Self {
        Self {
            team1_goals,
            team2_goals,
            winner,
            scorers_by_side: BTreeMap::new(),
        }
    }

    pub fn with_scorer(mut self, side: Side, player: impl Into<PlayerId>, goals: u32) -> Self {
        self.scorers_by_side
            .entry(side.number())
            .or_default()
            .insert(player.into(), goals);
        self
    }

    /// Outcome for a player who lined up on `side`.
    ///
    /// Returns `None` when the stored winner is not 0, 1 or 2.
    pub fn outcome_for(&self, side: Side) -> Option<Outcome> {
        match self.winner {
            0 => Some(Outcome::Drawn),
            w if w == side.number() => Some(Outcome::Won),
            1 | 2 => Some(Outcome::Lost),
            _ => None,
        }
    }

    /// Goals credited to `player` while playing on `side`.
    pub fn goals_for(&self, side: Side, player: &PlayerId) -> u32 {
        self.scorers_by_side
            .get(&side.number())
            .and_then(|scorers| scorers.get(player))
            .copied()
            .unwrap_or(0)
    }
}

/// One historical fixture week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWeekRecord {
    /// Collection the week belongs to
    pub month: MonthKey,

    /// Week index within the month
    pub week: u32,

    /// Side number per player; `null` marks a tracked player who sat out
    #[serde(default)]
    pub sides: BTreeMap<PlayerId, Option<u8>>,

    /// Present once the week has been played and scored
    #[serde(default)]
    pub score: Option<ScoreRecord>,
}

impl MatchWeekRecord {
    pub fn new(month: MonthKey, week: u32) -> Self {
        Self {
            month,
            week,
            sides: BTreeMap::new(),
            score: None,
        }
    }

    pub fn id(&self) -> WeekId {
        WeekId::new(self.month.clone(), self.week)
    }

    pub fn with_side(mut self, player: impl Into<PlayerId>, side: u8) -> Self {
        self.sides.insert(player.into(), Some(side));
        self
    }

    pub fn with_sitting_out(mut self, player: impl Into<PlayerId>) -> Self {
        self.sides.insert(player.into(), None);
        self
    }

    pub fn with_score(mut self, score: ScoreRecord) -> Self {
        self.score = Some(score);
        self
    }

    /// Player entries, excluding the reserved legacy scores key.
    pub fn entries(&self) -> impl Iterator<Item = (&PlayerId, Option<u8>)> {
        self.sides
            .iter()
            .filter(|(player, _)| player.as_str() != RESERVED_SCORES_KEY)
            .map(|(player, side)| (player, *side))
    }
}
