//! Plan inputs, cost totals, and the final report.

use serde::{Deserialize, Serialize};

use crate::catalog::Resource;
use crate::error::PlanError;
use crate::fixed::{Fixed64, Seconds, f64_to_fixed64};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Downtime factor applied when the requested one is missing or invalid.
pub const DEFAULT_DOWNTIME_FACTOR: f64 = 1.2;

/// Validated runtime inputs for a planning pass.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput {
    level: u32,
    workers: usize,
    downtime_factor: Fixed64,
    requested_downtime: f64,
    downtime_clamped: bool,
}

impl PlanInput {
    /// Validate runtime inputs.
    ///
    /// `level` and `workers` must both be at least 1. A downtime factor
    /// below 1.0, or non-finite, is not fatal: the default is applied and
    /// the substitution is recorded so the planner can report it.
    pub fn new(level: u32, workers: usize, downtime_factor: f64) -> Result<Self, PlanError> {
        if level == 0 {
            return Err(PlanError::InvalidLevel);
        }
        if workers == 0 {
            return Err(PlanError::InvalidWorkerCount);
        }

        let clamped = !(downtime_factor.is_finite() && downtime_factor >= 1.0);
        let applied = if clamped {
            DEFAULT_DOWNTIME_FACTOR
        } else {
            downtime_factor
        };

        Ok(Self {
            level,
            workers,
            downtime_factor: f64_to_fixed64(applied),
            requested_downtime: downtime_factor,
            downtime_clamped: clamped,
        })
    }

    /// The player's progression level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of interchangeable workers for the parallel lane.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The downtime factor actually applied.
    pub fn downtime_factor(&self) -> Fixed64 {
        self.downtime_factor
    }

    /// The downtime factor the caller asked for, pre-clamping.
    pub fn requested_downtime(&self) -> f64 {
        self.requested_downtime
    }

    /// Whether the requested downtime factor was replaced by the default.
    pub fn downtime_clamped(&self) -> bool {
        self.downtime_clamped
    }
}

// ---------------------------------------------------------------------------
// Cost totals
// ---------------------------------------------------------------------------

/// Accumulated upgrade cost per resource kind. Built once per plan,
/// immutable afterwards. Reporting iterates buckets in the fixed
/// [`Resource::ALL`] order and skips zero entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTotals {
    gold: u64,
    elixir: u64,
    dark_elixir: u64,
    gold_or_elixir: u64,
}

impl CostTotals {
    /// Create an all-zero total.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` into the bucket for `resource`, saturating.
    pub fn add(&mut self, resource: Resource, amount: u64) {
        let bucket = self.bucket_mut(resource);
        *bucket = bucket.saturating_add(amount);
    }

    /// Amount accumulated for `resource`.
    pub fn get(&self, resource: Resource) -> u64 {
        match resource {
            Resource::Gold => self.gold,
            Resource::Elixir => self.elixir,
            Resource::DarkElixir => self.dark_elixir,
            Resource::GoldOrElixir => self.gold_or_elixir,
        }
    }

    /// Sum across all buckets, saturating.
    pub fn grand_total(&self) -> u64 {
        Resource::ALL
            .iter()
            .fold(0u64, |acc, &r| acc.saturating_add(self.get(r)))
    }

    /// Nonzero buckets in fixed resource order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Resource, u64)> + '_ {
        Resource::ALL
            .iter()
            .map(|&r| (r, self.get(r)))
            .filter(|&(_, amount)| amount > 0)
    }

    fn bucket_mut(&mut self, resource: Resource) -> &mut u64 {
        match resource {
            Resource::Gold => &mut self.gold,
            Resource::Elixir => &mut self.elixir,
            Resource::DarkElixir => &mut self.dark_elixir,
            Resource::GoldOrElixir => &mut self.gold_or_elixir,
        }
    }
}

// ---------------------------------------------------------------------------
// The plan result
// ---------------------------------------------------------------------------

/// The result of a planning pass. Both the raw and downtime-adjusted totals
/// come from the same pass; neither is ever back-computed from the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePlan {
    /// Per-resource upgrade cost, wall cost already folded into elixir.
    pub totals: CostTotals,
    /// Number of tasks routed to the parallel lane.
    pub parallel_tasks: usize,
    /// Number of tasks routed to the serial lane.
    pub serial_tasks: usize,
    /// Makespan of the parallel lane under LPT scheduling.
    pub parallel_makespan: Seconds,
    /// Sum of serial-lane durations (strict sequential dependency).
    pub serial_total: Seconds,
    /// Completion time before downtime: the later-finishing of the two lanes.
    pub raw_total: Seconds,
    /// Completion time scaled by the downtime factor.
    pub adjusted_total: Seconds,
}

// ---------------------------------------------------------------------------
// Duration formatting
// ---------------------------------------------------------------------------

/// Render a duration as whole days, hours, and minutes. Sub-minute
/// remainders are truncated.
pub fn format_duration(seconds: Seconds) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    format!("{days} days, {hours} hours, {minutes} minutes")
}

// ===========================================================================
// Tests
// ===========================================================================
