//! Counters for non-fatal data problems seen during a run.

use serde::{Deserialize, Serialize};

/// Data inconsistencies and bounds warnings.
///
/// None of these stop a run; the weekly sheet is still produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Player-weeks (or whole weeks) skipped for bad side/winner values
    pub malformed_records: usize,

    /// Poll names with no canonical identity
    pub unresolved_aliases: usize,

    /// Poll names that resolved to a player already listed
    pub duplicate_names: usize,

    /// Standby slots the candidate slice could not fill
    pub standby_shortfall: usize,

    /// Players pushed to standby by the seating cap
    pub overflow_to_standby: usize,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        *self == RunReport::default()
    }

    pub fn merge(&mut self, other: &RunReport) {
        self.malformed_records += other.malformed_records;
        self.unresolved_aliases += other.unresolved_aliases;
        self.duplicate_names += other.duplicate_names;
        self.standby_shortfall += other.standby_shortfall;
        self.overflow_to_standby += other.overflow_to_standby;
    }
}
