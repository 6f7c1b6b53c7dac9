//! Stronghold Core -- upgrade cost and build time planning for
//! base-building games.
//!
//! Given a progression catalog (what exists, when it unlocks, what each
//! upgrade level costs and how long it takes), a player's progression level,
//! and a worker count, the planner answers two questions in one
//! deterministic pass: what does maxing everything out cost per resource,
//! and how long does it take.
//!
//! # Pipeline
//!
//! Data flows one way through [`planner::Planner::plan`]:
//!
//! 1. **Resolve** -- per item, how many instances exist and the highest
//!    upgrade level reachable ([`catalog::CatalogItem::quantity_at`],
//!    [`catalog::CatalogItem::max_upgrade_level`]).
//! 2. **Aggregate** -- accumulate per-resource cost totals and emit one
//!    task per (item, step, instance), routed to the parallel or serial
//!    lane by the category's declared [`catalog::QueueDiscipline`]. Wall
//!    costs fold into the elixir total and never become tasks.
//! 3. **Schedule** -- LPT greedy makespan for the parallel lane
//!    ([`schedule::schedule`]).
//! 4. **Combine** -- the raw total is the later-finishing lane; the
//!    adjusted total scales it by the downtime factor
//!    ([`planner::combine`]).
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- immutable item definitions, built by a loader.
//! - [`report::PlanInput`] -- validated runtime inputs (level, workers,
//!   downtime factor with clamping).
//! - [`planner::Planner`] -- the planning pass; buffers [`event::PlanEvent`]s
//!   drained by the caller instead of printing progress.
//! - [`report::UpgradePlan`] -- cost totals plus raw and adjusted times.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point for the downtime multiply.

pub mod catalog;
pub mod error;
pub mod event;
pub mod fixed;
pub mod planner;
pub mod report;
pub mod schedule;

pub use catalog::{
    Catalog, CatalogItem, Category, ItemKind, QueueDiscipline, Resource, UnlockRule, UpgradeStep,
};
pub use error::PlanError;
pub use event::{PlanEvent, PlanEventKind};
pub use crate::fixed::{Fixed64, Seconds};
pub use planner::{Planner, combine};
pub use report::{CostTotals, DEFAULT_DOWNTIME_FACTOR, PlanInput, UpgradePlan, format_duration};
pub use schedule::{ResolvedTask, schedule};
