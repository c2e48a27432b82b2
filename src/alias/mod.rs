//! Alias resolution: raw poll names to canonical player identities.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::models::{PlayerId, RunReport};

/// Maps a raw display name to a canonical player.
pub trait AliasResolver {
    /// `None` when the name is not known.
    fn resolve(&self, raw: &str) -> Option<PlayerId>;
}

/// Case-insensitive alias table held in memory.
///
/// Every canonical name also resolves to itself.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAliasResolver {
    names: HashMap<String, PlayerId>,
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl InMemoryAliasResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canonical player.
    pub fn add_player(&mut self, canonical: &str) -> &mut Self {
        let canonical = canonical.trim();
        self.names.insert(normalize(canonical), PlayerId::from(canonical));
        self
    }

    /// Register `alias` as another spelling of `canonical`.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) -> &mut Self {
        self.add_player(canonical);
        self.names
            .insert(normalize(alias), PlayerId::from(canonical.trim()));
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl AliasResolver for InMemoryAliasResolver {
    fn resolve(&self, raw: &str) -> Option<PlayerId> {
        self.names.get(&normalize(raw)).cloned()
    }
}

/// Resolve poll names into an ordered, de-duplicated canonical list.
///
/// Unknown names and repeats are skipped with a warning and counted in the
/// returned report.
pub fn resolve_eligible<A, S>(resolver: &A, raw_names: &[S]) -> (Vec<PlayerId>, RunReport)
where
    A: AliasResolver + ?Sized,
    S: AsRef<str>,
{
    let mut report = RunReport::default();
    let mut seen = HashSet::new();
    let mut eligible = Vec::new();

    for raw in raw_names {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            continue;
        }
        match resolver.resolve(raw) {
            Some(player) => {
                if seen.insert(player.clone()) {
                    eligible.push(player);
                } else {
                    warn!("Duplicate availability for {} (as {:?})", player, raw);
                    report.duplicate_names += 1;
                }
            }
            None => {
                warn!("No canonical player for {:?}; ignoring", raw);
                report.unresolved_aliases += 1;
            }
        }
    }

    (eligible, report)
}
