//! Engine error types.
//!
//! [`InitError`] and [`GenerateError`] map the two failure surfaces of the
//! pipeline (acquisition and execution); [`SubmitError`] is what the
//! coordinator exposes to callers. A failed job never poisons the service:
//! after any of these errors the next submission proceeds normally.

/// The diffusion pipeline could not be acquired.
///
/// Not retried automatically; the pipeline stays unloaded so the next
/// submission attempts initialisation again.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The loader failed (missing weights, incompatible hardware, ...).
    #[error("Failed to load pipeline: {0}")]
    Load(String),
}

/// The engine failed while executing a job.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Initialisation failed on the lazy-load path inside `run`.
    #[error(transparent)]
    Init(#[from] InitError),

    /// The backend reported a mid-run failure.
    #[error("Generation failed: {0}")]
    Engine(String),

    /// The blocking generation task aborted (panic or cancellation).
    #[error("Generation task aborted: {0}")]
    TaskAborted(String),
}

/// Errors surfaced by [`crate::GenerationCoordinator::submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Another job is running and the coordinator is configured to reject
    /// concurrent submissions.
    #[error("Another generation is already running")]
    Busy,

    /// The pipeline could not be initialised; no step progress was reported.
    #[error(transparent)]
    Init(#[from] InitError),

    /// The engine failed mid-run; the last reported step stays visible.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}
