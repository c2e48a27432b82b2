//! Historical stats aggregation over a bounded window of months.

use tracing::{debug, warn};

use super::CalculateError;
use crate::models::{MatchWeekRecord, MonthKey, PlayerId, RunReport, Side, StatsTable};

/// Result of folding the history window.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// One entry per tracked or eligible player
    pub table: StatsTable,

    /// Months inside the window, most recent first
    pub months: Vec<MonthKey>,

    /// Scored weeks that contributed results
    pub weeks_folded: usize,

    pub report: RunReport,
}

/// Weeks belonging to the first `window_months` distinct months.
///
/// `history` is most-recent-first. Counting months rather than weeks keeps
/// cancelled weeks from shrinking the window.
pub fn window(
    history: &[MatchWeekRecord],
    window_months: usize,
) -> (Vec<&MatchWeekRecord>, Vec<MonthKey>) {
    let mut months: Vec<MonthKey> = Vec::new();
    let mut weeks = Vec::new();

    for week in history {
        if !months.contains(&week.month) {
            if months.len() == window_months {
                break;
            }
            months.push(week.month.clone());
        }
        weeks.push(week);
    }

    (weeks, months)
}

/// Fold the history window into per-player stats.
///
/// Every player seen in the window is tracked. For each scored week a tracked
/// player either lines up on a side (won/lost/drawn plus goals) or counts a
/// game not played. Eligible players missing from the window get zeroed
/// entries. Malformed side or winner values are skipped and counted.
pub fn aggregate(
    history: &[MatchWeekRecord],
    window_months: usize,
    eligible: &[PlayerId],
) -> Result<Aggregation, CalculateError> {
    if window_months == 0 {
        return Err(CalculateError::InvalidWindow(window_months));
    }

    let (weeks, months) = window(history, window_months);
    let mut table = StatsTable::new();
    let mut report = RunReport::default();
    let mut weeks_folded = 0;

    for week in &weeks {
        for (player, _) in week.entries() {
            table.entry(player);
        }
    }
    let tracked: Vec<PlayerId> = table.players().to_vec();

    for week in &weeks {
        let Some(score) = &week.score else { continue };

        if score.outcome_for(Side::Red).is_none() {
            warn!("Skipping week {}: invalid winner {}", week.id(), score.winner);
            report.malformed_records += 1;
            continue;
        }

        for player in &tracked {
            let side_number = week.sides.get(player).copied().flatten();
            let stats = table.entry(player);
            match side_number {
                None => stats.record_not_played(),
                Some(n) => match Side::from_number(n).and_then(|side| {
                    score
                        .outcome_for(side)
                        .map(|outcome| (outcome, score.goals_for(side, player)))
                }) {
                    Some((outcome, goals)) => stats.record(outcome, goals),
                    None => {
                        warn!(
                            "Skipping {} in week {}: side value {} is not 1 or 2",
                            player,
                            week.id(),
                            n
                        );
                        report.malformed_records += 1;
                    }
                },
            }
        }

        weeks_folded += 1;
    }

    for player in eligible {
        table.entry(player);
    }

    debug!(
        "Aggregated {} scored weeks over {} months into {} players",
        weeks_folded,
        months.len(),
        table.len()
    );

    Ok(Aggregation {
        table,
        months,
        weeks_folded,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerStats, ScoreRecord};

    fn month(key: &str) -> MonthKey {
        MonthKey::new(key)
    }

    fn pid(name: &str) -> PlayerId {
        PlayerId::from(name)
    }

    fn stats_of(agg: &Aggregation, name: &str) -> PlayerStats {
        *agg.table.get(&pid(name)).unwrap()
    }

    #[test]
    fn test_window_counts_months_not_weeks() {
        let history = vec![
            MatchWeekRecord::new(month("2025-03"), 2),
            MatchWeekRecord::new(month("2025-03"), 1),
            MatchWeekRecord::new(month("2025-02"), 4),
            MatchWeekRecord::new(month("2025-02"), 3),
            MatchWeekRecord::new(month("2025-02"), 2),
            MatchWeekRecord::new(month("2025-01"), 4),
        ];

        let (weeks, months) = window(&history, 2);
        assert_eq!(weeks.len(), 5);
        assert_eq!(months, vec![month("2025-03"), month("2025-02")]);
    }

    #[test]
    fn test_aggregate_results_and_goals() {
        let history = vec![
            MatchWeekRecord::new(month("2025-03"), 1)
                .with_side("Alice", 1)
                .with_side("Bob", 2)
                .with_score(ScoreRecord::new(3, 1, 1).with_scorer(Side::Red, "Alice", 2)),
            MatchWeekRecord::new(month("2025-02"), 4)
                .with_side("Alice", 2)
                .with_side("Bob", 1)
                .with_score(ScoreRecord::new(2, 2, 0).with_scorer(Side::Blue, "Alice", 1)),
        ];

        let agg = aggregate(&history, 3, &[]).unwrap();
        let alice = stats_of(&agg, "Alice");
        assert_eq!((alice.won, alice.drawn, alice.lost), (1, 1, 0));
        assert_eq!(alice.goals_scored, 3);
        assert_eq!(alice.weighted_points, 8);

        let bob = stats_of(&agg, "Bob");
        assert_eq!((bob.won, bob.drawn, bob.lost), (0, 1, 1));
        assert_eq!(bob.weighted_points, 4);
        assert_eq!(agg.weeks_folded, 2);
        assert!(agg.report.is_clean());
    }

    #[test]
    fn test_unscored_weeks_do_not_count() {
        let history = vec![
            MatchWeekRecord::new(month("2025-03"), 2).with_side("Alice", 1),
            MatchWeekRecord::new(month("2025-03"), 1)
                .with_side("Alice", 1)
                .with_score(ScoreRecord::new(1, 0, 1)),
        ];

        let agg = aggregate(&history, 1, &[]).unwrap();
        assert_eq!(stats_of(&agg, "Alice").games_played(), 1);
        assert_eq!(agg.weeks_folded, 1);
    }

    #[test]
    fn test_tracked_player_missing_from_scored_week_counts_not_played() {
        let history = vec![
            MatchWeekRecord::new(month("2025-03"), 2)
                .with_side("Alice", 1)
                .with_sitting_out("Bob")
                .with_score(ScoreRecord::new(1, 0, 1)),
            MatchWeekRecord::new(month("2025-03"), 1)
                .with_side("Alice", 1)
                .with_score(ScoreRecord::new(0, 1, 2)),
            MatchWeekRecord::new(month("2025-02"), 1)
                .with_side("Cara", 2)
                .with_score(ScoreRecord::new(0, 1, 2)),
        ];

        let agg = aggregate(&history, 2, &[]).unwrap();
        assert_eq!(stats_of(&agg, "Bob").games_not_played, 3);
        assert_eq!(stats_of(&agg, "Bob").games_played(), 0);
        assert_eq!(stats_of(&agg, "Cara").games_not_played, 2);
        assert_eq!(stats_of(&agg, "Cara").won, 1);
        assert_eq!(stats_of(&agg, "Alice").games_not_played, 1);
    }

    #[test]
    fn test_eligible_newcomers_get_zeroed_entries() {
        let history = vec![MatchWeekRecord::new(month("2025-03"), 1)
            .with_side("Alice", 1)
            .with_score(ScoreRecord::new(1, 0, 1))];

        let agg = aggregate(&history, 1, &[pid("Newbie"), pid("Alice")]).unwrap();
        assert_eq!(stats_of(&agg, "Newbie"), PlayerStats::default());
        let names: Vec<&str> = agg.table.players().iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Newbie"]);
    }

    #[test]
    fn test_malformed_side_is_skipped_for_that_week_only() {
        let history = vec![
            MatchWeekRecord::new(month("2025-03"), 2)
                .with_side("Alice", 3)
                .with_side("Bob", 2)
                .with_score(ScoreRecord::new(0, 2, 2)),
            MatchWeekRecord::new(month("2025-03"), 1)
                .with_side("Alice", 1)
                .with_side("Bob", 2)
                .with_score(ScoreRecord::new(0, 2, 2)),
        ];

        let agg = aggregate(&history, 1, &[]).unwrap();
        let alice = stats_of(&agg, "Alice");
        assert_eq!(alice.games_played(), 1);
        assert_eq!(alice.lost, 1);
        assert_eq!(alice.games_not_played, 0);
        assert_eq!(stats_of(&agg, "Bob").won, 2);
        assert_eq!(agg.report.malformed_records, 1);
    }

    #[test]
    fn test_invalid_winner_skips_week() {
        let history = vec![MatchWeekRecord::new(month("2025-03"), 1)
            .with_side("Alice", 1)
            .with_score(ScoreRecord::new(1, 0, 9))];

        let agg = aggregate(&history, 1, &[]).unwrap();
        assert_eq!(stats_of(&agg, "Alice"), PlayerStats::default());
        assert_eq!(agg.report.malformed_records, 1);
        assert_eq!(agg.weeks_folded, 0);
    }

    #[test]
    fn test_window_excludes_older_months() {
        let history = vec![
            MatchWeekRecord::new(month("2025-03"), 1)
                .with_side("Alice", 1)
                .with_score(ScoreRecord::new(1, 0, 1)),
            MatchWeekRecord::new(month("2025-02"), 1)
                .with_side("Alice", 1)
                .with_side("Old", 2)
                .with_score(ScoreRecord::new(1, 0, 1)),
        ];

        let agg = aggregate(&history, 1, &[]).unwrap();
        assert_eq!(stats_of(&agg, "Alice").won, 1);
        assert!(!agg.table.contains(&pid("Old")));
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let err = aggregate(&[], 0, &[]).unwrap_err();
        assert!(matches!(err, CalculateError::InvalidWindow(0)));
    }
}
