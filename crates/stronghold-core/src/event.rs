//! Plan events.
//!
//! The planner buffers one event per notable decision instead of printing
//! progress. Callers that want narration drain the buffer after a plan;
//! callers that don't pay only for the buffered `Vec`.

use crate::catalog::QueueDiscipline;
use crate::fixed::{Fixed64, Seconds};

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// An observability event emitted while a plan is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    /// A batch of identical upgrade tasks was routed to a work lane,
    /// one task per instance of the item. `cost` and `duration` are per
    /// instance.
    TasksQueued {
        item: String,
        level: u32,
        count: u32,
        lane: QueueDiscipline,
        cost: u64,
        duration: Seconds,
    },

    /// Accumulated wall cost was folded into the elixir total.
    WallCostFolded { amount: u64 },

    /// The requested downtime factor was invalid and the default was
    /// applied instead.
    DowntimeClamped { requested: f64, applied: Fixed64 },
}

/// Discriminant tag for event types, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanEventKind {
    TasksQueued,
    WallCostFolded,
    DowntimeClamped,
}

impl PlanEvent {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> PlanEventKind {
        match self {
            PlanEvent::TasksQueued { .. } => PlanEventKind::TasksQueued,
            PlanEvent::WallCostFolded { .. } => PlanEventKind::WallCostFolded,
            PlanEvent::DowntimeClamped { .. } => PlanEventKind::DowntimeClamped,
        }
    }
}
