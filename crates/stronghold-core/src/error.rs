/// Errors that can occur while validating plan inputs or scheduling.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Scheduling with zero workers is undefined.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    /// Progression level 0 unlocks nothing; treat it as caller error.
    #[error("progression level must be at least 1")]
    InvalidLevel,
}
