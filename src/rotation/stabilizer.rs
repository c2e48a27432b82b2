//! Keeps a published team sheet stable across repeated generation.
//!
//! A draft is only rebuilt when the eligible player set differs from the set
//! covered by the previous draft. Otherwise the previous draft is returned
//! as-is, list order included.

use std::collections::HashSet;

use tracing::info;

use crate::models::{Draft, PlayerId};

/// How the eligible set compares with the previous draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    /// No previous draft for this week
    Initial,

    /// Players joined or dropped out since the previous draft
    Changed {
        added: Vec<PlayerId>,
        removed: Vec<PlayerId>,
    },

    Unchanged,
}

impl DraftChange {
    pub fn requires_regeneration(&self) -> bool {
        !matches!(self, DraftChange::Unchanged)
    }
}

impl std::fmt::Display for DraftChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftChange::Initial => write!(f, "no previous draft"),
            DraftChange::Changed { added, removed } => write!(
                f,
                "{} players added, {} players removed",
                added.len(),
                removed.len()
            ),
            DraftChange::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A draft plus whether it was freshly generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Stabilized {
    pub draft: Draft,
    pub regenerated: bool,
    pub change: DraftChange,
}

/// Compare `eligible` with the players on `previous`.
pub fn detect_change(previous: Option<&Draft>, eligible: &[PlayerId]) -> DraftChange {
    let Some(previous) = previous else {
        return DraftChange::Initial;
    };

    let current: HashSet<&PlayerId> = eligible.iter().collect();
    let published: HashSet<&PlayerId> = previous.players().collect();

    let mut added_seen = HashSet::new();
    let added: Vec<PlayerId> = eligible
        .iter()
        .filter(|p| !published.contains(p) && added_seen.insert(*p))
        .cloned()
        .collect();
    let removed: Vec<PlayerId> = previous
        .players()
        .filter(|p| !current.contains(p))
        .cloned()
        .collect();

    if added.is_empty() && removed.is_empty() {
        DraftChange::Unchanged
    } else {
        DraftChange::Changed { added, removed }
    }
}

/// Standby hint for a regeneration: explicit overrides first, then whoever
/// was on standby in the previous draft.
pub fn continuity_hint(forced: &[PlayerId], previous: Option<&Draft>) -> Vec<PlayerId> {
    let carried = previous
        .map(|d| d.standby_players.as_slice())
        .unwrap_or_default();

    let mut seen = HashSet::new();
    forced
        .iter()
        .chain(carried.iter())
        .filter(|p| seen.insert(*p))
        .cloned()
        .collect()
}

/// Return `previous` untouched when nothing changed, otherwise call
/// `regenerate` with the standby hint.
pub fn stabilize<F, E>(
    previous: Option<&Draft>,
    eligible: &[PlayerId],
    forced: &[PlayerId],
    regenerate: F,
) -> Result<Stabilized, E>
where
    F: FnOnce(&[PlayerId]) -> Result<Draft, E>,
{
    let change = detect_change(previous, eligible);

    match previous {
        Some(draft) if !change.requires_regeneration() => {
            info!("Eligible players unchanged; keeping previous draft");
            Ok(Stabilized {
                draft: draft.clone(),
                regenerated: false,
                change,
            })
        }
        _ => {
            info!("Regenerating draft: {}", change);
            let hint = continuity_hint(forced, previous);
            let draft = regenerate(&hint)?;
            Ok(Stabilized {
                draft,
                regenerated: true,
                change,
            })
        }
    }
}
