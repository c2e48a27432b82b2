//! Standby selection.
//!
//! Decides how many eligible players sit out and which ones. Frequent players
//! get priority for a game slot: the candidate pool is ordered by games
//! played ascending, and the random draw only covers the front of it.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::SquadRules;
use crate::models::{PlayerId, RankedPlayer};

/// Who sits out this week, and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandbySelection {
    /// Forced picks first, then random picks
    pub standby: Vec<PlayerId>,

    /// Subset of `standby` taken from the forced list
    pub forced: Vec<PlayerId>,

    /// Slots the squad-size rule asked for
    pub needed: usize,

    /// Slots left unfilled because the candidate slice ran out
    pub shortfall: usize,
}

/// Pick standby players from `ranked` (eligible only, rank order).
///
/// `forced` names are honoured first, in order, while slots remain; names not
/// in the pool are ignored. Remaining slots come from a shuffled slice of the
/// least-experienced half of the pool.
pub fn select_standby<R: Rng + ?Sized>(
    ranked: &[RankedPlayer],
    forced: &[PlayerId],
    rules: &SquadRules,
    rng: &mut R,
) -> StandbySelection {
    let needed = rules.standby_needed(ranked.len());
    let mut selection = StandbySelection {
        needed,
        ..Default::default()
    };
    if needed == 0 {
        return selection;
    }

    let mut pool: Vec<&RankedPlayer> = ranked.iter().collect();
    pool.sort_by_key(|r| r.stats.games_played());

    for name in forced {
        if selection.standby.len() == needed {
            break;
        }
        if let Some(pos) = pool.iter().position(|r| &r.player == name) {
            let picked = pool.remove(pos);
            selection.standby.push(picked.player.clone());
            selection.forced.push(picked.player.clone());
        }
    }

    let remaining = needed - selection.standby.len();
    if remaining > 0 {
        let slice_len = (pool.len() / 2).saturating_sub(rules.slice_trim);
        let mut candidates: Vec<&RankedPlayer> = pool[..slice_len].to_vec();
        candidates.shuffle(rng);

        let drawn = remaining.min(candidates.len());
        selection
            .standby
            .extend(candidates.iter().take(drawn).map(|r| r.player.clone()));

        selection.shortfall = remaining - drawn;
        if selection.shortfall > 0 {
            warn!(
                "Standby shortfall: needed {} more but candidate slice held {}",
                remaining,
                candidates.len()
            );
        }
    }

    debug!(
        "Standby: {} of {} needed ({} forced) from {} eligible",
        selection.standby.len(),
        needed,
        selection.forced.len(),
        ranked.len()
    );
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerStats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// `n` eligible players; player `pN` has played N games.
    fn pool(n: u32) -> Vec<RankedPlayer> {
        (0..n)
            .map(|i| RankedPlayer {
                player: PlayerId::new(format!("p{}", i)),
                stats: PlayerStats {
                    won: i,
                    ..Default::default()
                },
                rank_value: f64::from(n - i),
                eligible: true,
            })
            .collect()
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_no_standby_at_or_below_base_squad() {
        let rules = SquadRules::default();
        for n in [0, 4, 10] {
            let selection = select_standby(&pool(n), &[], &rules, &mut rng(1));
            assert!(selection.standby.is_empty());
            assert_eq!(selection.needed, 0);
        }
    }

    #[test]
    fn test_standby_counts() {
        let rules = SquadRules::default();
        assert_eq!(select_standby(&pool(11), &[], &rules, &mut rng(1)).standby.len(), 1);
        assert_eq!(select_standby(&pool(12), &[], &rules, &mut rng(1)).standby.len(), 0);
        assert_eq!(select_standby(&pool(13), &[], &rules, &mut rng(1)).standby.len(), 1);
        assert_eq!(select_standby(&pool(16), &[], &rules, &mut rng(1)).standby.len(), 4);
    }

    #[test]
    fn test_random_picks_come_from_least_experienced_slice() {
        let rules = SquadRules::default();
        // 16 players: slice is 16/2 - 2 = 6, so only p0..p5 can be drawn
        for seed in 0..20 {
            let selection = select_standby(&pool(16), &[], &rules, &mut rng(seed));
            for player in &selection.standby {
                let games: u32 = player.as_str()[1..].parse().unwrap();
                assert!(games < 6, "{} drawn outside slice", player);
            }
        }
    }

    #[test]
    fn test_same_seed_same_standby() {
        let rules = SquadRules::default();
        let a = select_standby(&pool(16), &[], &rules, &mut rng(99));
        let b = select_standby(&pool(16), &[], &rules, &mut rng(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_forced_standby_honoured_first() {
        let rules = SquadRules::default();
        let forced = vec![PlayerId::from("p12"), PlayerId::from("absent")];
        let selection = select_standby(&pool(13), &forced, &rules, &mut rng(3));

        assert_eq!(selection.standby, vec![PlayerId::from("p12")]);
        assert_eq!(selection.forced, vec![PlayerId::from("p12")]);
        assert_eq!(selection.shortfall, 0);
    }

    #[test]
    fn test_forced_list_capped_at_needed() {
        let rules = SquadRules::default();
        let forced = vec![
            PlayerId::from("p9"),
            PlayerId::from("p10"),
            PlayerId::from("p11"),
        ];
        let selection = select_standby(&pool(14), &forced, &rules, &mut rng(3));

        assert_eq!(selection.needed, 2);
        assert_eq!(
            selection.standby,
            vec![PlayerId::from("p9"), PlayerId::from("p10")]
        );
    }

    #[test]
    fn test_forced_then_random_fill() {
        let rules = SquadRules::default();
        let forced = vec![PlayerId::from("p15")];
        let selection = select_standby(&pool(16), &forced, &rules, &mut rng(5));

        assert_eq!(selection.standby.len(), 4);
        assert_eq!(selection.standby[0], PlayerId::from("p15"));
        assert_eq!(selection.forced.len(), 1);
    }

    #[test]
    fn test_shortfall_is_reported_not_panicked() {
        let rules = SquadRules::default();
        // 30 players: needs 18, slice is 30/2 - 2 = 13
        let selection = select_standby(&pool(30), &[], &rules, &mut rng(8));

        assert_eq!(selection.needed, 18);
        assert_eq!(selection.standby.len(), 13);
        assert_eq!(selection.shortfall, 5);
    }

    #[test]
    fn test_tiny_slice_with_custom_rules() {
        let rules = SquadRules {
            max_seated: 2,
            base_seated: 2,
            slice_trim: 2,
        };
        let selection = select_standby(&pool(3), &[], &rules, &mut rng(8));
        assert_eq!(selection.needed, 1);
        assert!(selection.standby.is_empty());
        assert_eq!(selection.shortfall, 1);
    }
}
