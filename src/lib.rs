//! # Rotation Engine
//!
//! Weekly team balancing and fair standby rotation for a recurring
//! five/six-a-side fixture.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (weeks, stats, drafts)
//! - **alias**: Raw poll names to canonical players
//! - **calculate**: Windowed stats aggregation and rank policies
//! - **rotation**: Standby selection, team split and draft stabilization
//! - **storage**: File-backed history, drafts and availability for the CLI
//! - **config**: Configuration loading and validation

pub mod alias;
pub mod calculate;
pub mod config;
pub mod models;
pub mod rotation;
pub mod storage;

pub use models::*;

use chrono::{Datelike, NaiveDate};

/// Parse a fixture date given as `YYYY-MM-DD`.
pub fn parse_fixture_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Fixture week containing `date`: days 1-7 are week 1, 8-14 week 2, etc.
pub fn week_for_date(date: NaiveDate) -> WeekId {
    WeekId::new(MonthKey::from_date(date), (date.day() - 1) / 7 + 1)
}
