//! Red/blue split of the seated players.

use tracing::warn;

use crate::models::PlayerId;

/// Output of [`assign_teams`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamSplit {
    pub red: Vec<PlayerId>,
    pub blue: Vec<PlayerId>,

    /// Players beyond the seating cap; they join standby
    pub overflow: Vec<PlayerId>,
}

/// Alternate players onto red and blue in the given (rank) order.
///
/// Even positions go red, odd go blue. A side holding
/// `floor(seated / 2) + 1` players is closed and further players go to the
/// other side. No more than `max_seated` players are ever seated.
pub fn assign_teams(ordered: &[PlayerId], max_seated: usize) -> TeamSplit {
    let seat_count = ordered.len().min(max_seated);
    let (seated, rest) = ordered.split_at(seat_count);
    let max_per_side = seat_count / 2 + 1;

    let mut split = TeamSplit {
        overflow: rest.to_vec(),
        ..Default::default()
    };
    if !split.overflow.is_empty() {
        warn!(
            "Seating cap {} exceeded; {} players moved to standby",
            max_seated,
            split.overflow.len()
        );
    }

    for (i, player) in seated.iter().enumerate() {
        let red_open = split.red.len() < max_per_side;
        let blue_open = split.blue.len() < max_per_side;
        match (i % 2 == 0, red_open, blue_open) {
            (true, true, _) | (false, true, false) => split.red.push(player.clone()),
            (false, _, true) | (true, false, true) => split.blue.push(player.clone()),
            _ => split.overflow.push(player.clone()),
        }
    }

    split
}
