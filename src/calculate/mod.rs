//! Statistics calculation engine.
//!
//! Computes per-player metrics from stored fixture history:
//! - Windowed win/draw/loss, goals and weighted points
//! - Rank values under each named policy

pub mod aggregate;
pub mod ranking;

use thiserror::Error;

use crate::models::UnknownPolicy;

pub use aggregate::{aggregate, Aggregation};
pub use ranking::{eligible_only, rank, score, DEFAULT_MIN_GAMES_FOR_RANK};

/// Configuration problems detected while calculating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculateError {
    #[error(transparent)]
    InvalidPolicy(#[from] UnknownPolicy),

    #[error("History window must cover at least one month (got {0})")]
    InvalidWindow(usize),
}

/// `numerator / denominator`, or 0.0 when there is nothing to divide by.
pub fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}
