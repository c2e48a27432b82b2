//! Rank values under the named policies.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use super::ratio;
use crate::models::{PlayerId, PlayerStats, RankPolicy, RankedPlayer, StatsTable};

/// Players with this many games or fewer get the policy's new-player default.
pub const DEFAULT_MIN_GAMES_FOR_RANK: u32 = 5;

/// Rank value for one player.
///
/// `rng` is only drawn from by [`RankPolicy::Random`] for players with
/// enough games.
pub fn score<R: Rng + ?Sized>(
    stats: &PlayerStats,
    policy: RankPolicy,
    min_games: u32,
    rng: &mut R,
) -> f64 {
    let played = stats.games_played();
    if played <= min_games {
        return policy.new_player_default();
    }

    match policy {
        RankPolicy::Random => rng.gen::<f64>(),
        RankPolicy::WinRatio => ratio(stats.won, played),
        RankPolicy::WinOrDrawRatio => ratio(stats.won + stats.drawn, played),
        RankPolicy::AvgWeightedPoints => ratio(stats.weighted_points, played),
        RankPolicy::TotalWeightedPoints => f64::from(stats.weighted_points),
        RankPolicy::GamesPlayedCount => f64::from(played),
        RankPolicy::GoalsPerGame => ratio(stats.goals_scored, played),
    }
}

/// Rank every player in `table`, highest value first.
///
/// Input order is eligible players in the given (alias resolution) order,
/// then the remaining tracked players in first-seen order. The sort is
/// stable, so equal values keep that order.
pub fn rank<R: Rng + ?Sized>(
    table: &StatsTable,
    eligible: &[PlayerId],
    policy: RankPolicy,
    min_games: u32,
    rng: &mut R,
) -> Vec<RankedPlayer> {
    let eligible_set: HashSet<&PlayerId> = eligible.iter().collect();
    let mut seen: HashSet<&PlayerId> = HashSet::new();

    let ordered = eligible
        .iter()
        .chain(table.players().iter())
        .filter(|p| seen.insert(*p));

    let mut ranked: Vec<RankedPlayer> = ordered
        .map(|player| {
            let stats = table.get(player).copied().unwrap_or_default();
            RankedPlayer {
                player: player.clone(),
                rank_value: score(&stats, policy, min_games, rng),
                stats,
                eligible: eligible_set.contains(player),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.rank_value.total_cmp(&a.rank_value));

    debug!(
        "Ranked {} players ({} eligible) by {}",
        ranked.len(),
        eligible_set.len(),
        policy
    );
    ranked
}

/// Eligible rows only, keeping rank order.
pub fn eligible_only(ranked: &[RankedPlayer]) -> Vec<RankedPlayer> {
    ranked.iter().filter(|r| r.eligible).cloned().collect()
}
