//! Weekly rotation pipeline.
//!
//! Turns this week's eligible players, the history window and the previous
//! draft into a red/blue/standby sheet:
//!
//! - **standby**: how many sit out and who
//! - **teams**: alternate split of the seated players
//! - **stabilizer**: skip regeneration when the eligible set is unchanged
//!
//! The pipeline is a pure function of its inputs plus the supplied RNG.
//! It performs no I/O and persists nothing.

pub mod stabilizer;
pub mod standby;
pub mod teams;

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculate::{self, CalculateError};
use crate::config::EngineConfig;
use crate::models::{
    Draft, MatchWeekRecord, PlayerId, RankPolicy, RankedPlayer, RunReport, UnknownPolicy,
};

pub use stabilizer::{continuity_hint, detect_change, stabilize, DraftChange, Stabilized};
pub use standby::{select_standby, StandbySelection};
pub use teams::{assign_teams, TeamSplit};

/// Errors that stop a run. All of them are configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Calculate(#[from] CalculateError),

    #[error("Invalid squad rules: {0}")]
    InvalidSquad(String),
}

impl From<UnknownPolicy> for EngineError {
    fn from(err: UnknownPolicy) -> Self {
        EngineError::Calculate(CalculateError::InvalidPolicy(err))
    }
}

/// Squad-size limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadRules {
    /// Most players seated across both sides
    #[serde(default = "default_max_seated")]
    pub max_seated: usize,

    /// Seats used when fewer than `max_seated` are available
    #[serde(default = "default_base_seated")]
    pub base_seated: usize,

    /// Trimmed from half the pool before the random standby draw
    #[serde(default = "default_slice_trim")]
    pub slice_trim: usize,
}

fn default_max_seated() -> usize {
    12
}

fn default_base_seated() -> usize {
    10
}

fn default_slice_trim() -> usize {
    2
}

impl Default for SquadRules {
    fn default() -> Self {
        Self {
            max_seated: default_max_seated(),
            base_seated: default_base_seated(),
            slice_trim: default_slice_trim(),
        }
    }
}

impl SquadRules {
    /// Players who must sit out from `eligible` available.
    pub fn standby_needed(&self, eligible: usize) -> usize {
        if eligible >= self.max_seated {
            eligible - self.max_seated
        } else {
            eligible.saturating_sub(self.base_seated)
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_seated == 0 {
            return Err(EngineError::InvalidSquad(
                "max_seated must be greater than 0".to_string(),
            ));
        }
        if self.base_seated > self.max_seated {
            return Err(EngineError::InvalidSquad(format!(
                "base_seated ({}) exceeds max_seated ({})",
                self.base_seated, self.max_seated
            )));
        }
        Ok(())
    }
}

/// Inputs for one week's generation.
#[derive(Debug, Clone, Copy)]
pub struct DraftRequest<'a> {
    /// Most recent first
    pub history: &'a [MatchWeekRecord],

    /// Canonical, de-duplicated, in alias resolution order
    pub eligible: &'a [PlayerId],

    pub previous: Option<&'a Draft>,

    /// Administrator standby overrides
    pub forced_standby: &'a [PlayerId],
}

/// Result of [`RotationEngine::generate`].
#[derive(Debug, Clone)]
pub struct DraftOutcome {
    pub draft: Draft,
    pub regenerated: bool,
    pub change: DraftChange,

    /// Eligible players in rank order; empty when the previous draft was kept
    pub ranking: Vec<RankedPlayer>,

    pub report: RunReport,
}

/// The ranking, standby and team-split pipeline with its settings.
#[derive(Debug, Clone)]
pub struct RotationEngine {
    policy: RankPolicy,
    window_months: usize,
    min_games_for_rank: u32,
    squad: SquadRules,
}

impl RotationEngine {
    /// Build an engine, rejecting unknown policies and empty windows.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let policy: RankPolicy = config.policy.parse()?;
        if config.window_months == 0 {
            return Err(CalculateError::InvalidWindow(config.window_months).into());
        }
        config.squad.validate()?;

        Ok(Self {
            policy,
            window_months: config.window_months,
            min_games_for_rank: config.min_games_for_rank,
            squad: config.squad.clone(),
        })
    }

    /// Use a different ranking policy.
    pub fn with_policy(mut self, policy: RankPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RankPolicy {
        self.policy
    }

    /// Rank everyone in the window plus this week's eligible players.
    pub fn rank<R: Rng + ?Sized>(
        &self,
        history: &[MatchWeekRecord],
        eligible: &[PlayerId],
        rng: &mut R,
    ) -> Result<(Vec<RankedPlayer>, RunReport), EngineError> {
        let aggregation = calculate::aggregate(history, self.window_months, eligible)?;
        let ranked = calculate::rank(
            &aggregation.table,
            eligible,
            self.policy,
            self.min_games_for_rank,
            rng,
        );
        Ok((ranked, aggregation.report))
    }

    /// Produce this week's draft, reusing `request.previous` when the eligible
    /// set has not changed.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: DraftRequest<'_>,
        rng: &mut R,
    ) -> Result<DraftOutcome, EngineError> {
        let mut ranking = Vec::new();
        let mut report = RunReport::default();

        let stabilized = stabilize(
            request.previous,
            request.eligible,
            request.forced_standby,
            |hint| {
                let (draft, ranked, run_report) = self.build_draft(
                    request.history,
                    request.eligible,
                    hint,
                    request.forced_standby,
                    rng,
                )?;
                ranking = ranked;
                report = run_report;
                Ok::<Draft, EngineError>(draft)
            },
        )?;

        Ok(DraftOutcome {
            draft: stabilized.draft,
            regenerated: stabilized.regenerated,
            change: stabilized.change,
            ranking,
            report,
        })
    }

    fn build_draft<R: Rng + ?Sized>(
        &self,
        history: &[MatchWeekRecord],
        eligible: &[PlayerId],
        standby_hint: &[PlayerId],
        admin_forced: &[PlayerId],
        rng: &mut R,
    ) -> Result<(Draft, Vec<RankedPlayer>, RunReport), EngineError> {
        if eligible.is_empty() {
            warn!("No eligible players; producing an empty draft");
            return Ok((Draft::empty(), Vec::new(), RunReport::default()));
        }

        let (ranked, mut report) = self.rank(history, eligible, rng)?;
        let ranked = calculate::eligible_only(&ranked);

        let selection = select_standby(&ranked, standby_hint, &self.squad, rng);
        let benched: HashSet<&PlayerId> = selection.standby.iter().collect();
        let seated: Vec<PlayerId> = ranked
            .iter()
            .map(|r| &r.player)
            .filter(|p| !benched.contains(p))
            .cloned()
            .collect();

        let split = assign_teams(&seated, self.squad.max_seated);
        report.standby_shortfall = selection.shortfall;
        report.overflow_to_standby = split.overflow.len();

        let admin: HashSet<&PlayerId> = admin_forced.iter().collect();
        let is_forced_override = selection.forced.iter().any(|p| admin.contains(p));

        let mut standby_players = selection.standby;
        standby_players.extend(split.overflow);

        let draft = Draft {
            red_players: split.red,
            blue_players: split.blue,
            standby_players,
            is_forced_override,
        };

        if !draft.is_partition_of(eligible) {
            warn!("Draft does not cover the eligible players exactly once");
        }
        debug!("Built draft: {} ({} seated)", draft.summary(), draft.seated());

        Ok((draft, ranked, report))
    }
}
