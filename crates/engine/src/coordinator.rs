//! The generation coordinator.
//!
//! [`GenerationCoordinator`] is the single point where the service's
//! concurrency is constrained: request handlers run freely in parallel, but
//! only one job at a time executes against the pipeline, and every read or
//! write of the progress record goes through the record's own short-lived
//! lock. Created once at startup and shared via `Arc` in the app state.

use std::str::FromStr;
use std::sync::Arc;

use imagegen_core::job::JobSpec;
use imagegen_core::progress::ProgressSnapshot;
use tokio::sync::Mutex;

use crate::error::SubmitError;
use crate::handle::PipelineHandle;
use crate::model::{Generated, ModelLoader};
use crate::progress::ProgressTracker;

/// What to do when a job is submitted while another is still running.
///
/// The pipeline admits one job at a time either way; this only decides the
/// fate of the second caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyPolicy {
    /// The second caller waits for the running job, then executes. Default.
    Queue,
    /// The second caller fails fast with [`SubmitError::Busy`].
    Reject,
}

impl FromStr for BusyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queue" => Ok(Self::Queue),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "invalid submit policy '{other}' (expected 'queue' or 'reject')"
            )),
        }
    }
}

/// Orchestrates the lifecycle of one generation job at a time and owns the
/// progress record visible to pollers.
pub struct GenerationCoordinator {
    handle: PipelineHandle,
    progress: Arc<ProgressTracker>,
    /// Serialises job execution against the single pipeline. Held across
    /// the whole run; the record lock inside `progress` is never held
    /// across any await or engine step.
    job_lock: Mutex<()>,
    busy_policy: BusyPolicy,
}

impl GenerationCoordinator {
    pub fn new(loader: Arc<dyn ModelLoader>, busy_policy: BusyPolicy) -> Self {
        Self {
            handle: PipelineHandle::new(loader),
            progress: Arc::new(ProgressTracker::new()),
            job_lock: Mutex::new(()),
            busy_policy,
        }
    }

    /// Run one generation job to completion.
    ///
    /// Blocks the caller until the job succeeds or fails; there is no
    /// cancellation path. Lifecycle: reset the progress record, ensure the
    /// pipeline is loaded, run the engine with a step callback that updates
    /// the record, then finalise (success) or deactivate (failure). Errors
    /// are local to this job -- the next submission starts from a clean
    /// reset.
    pub async fn submit(&self, job: JobSpec) -> Result<Generated, SubmitError> {
        let _running = match self.busy_policy {
            BusyPolicy::Queue => self.job_lock.lock().await,
            BusyPolicy::Reject => self.job_lock.try_lock().map_err(|_| SubmitError::Busy)?,
        };

        tracing::info!(
            steps = job.steps,
            width = job.width,
            height = job.height,
            prompt = %truncate(&job.prompt, 60),
            "Generation job started",
        );

        self.progress.begin(job.steps);

        if let Err(e) = self.handle.ensure_loaded().await {
            tracing::error!(error = %e, "Pipeline initialisation failed");
            self.progress.deactivate();
            return Err(SubmitError::Init(e));
        }

        let tracker = Arc::clone(&self.progress);
        match self.handle.run(job, move |step| tracker.record_step(step)).await {
            Ok(generated) => {
                self.progress.complete();
                tracing::info!(seed = generated.seed, "Generation job done");
                Ok(generated)
            }
            Err(e) => {
                // Step and percentage keep their last values for diagnosis.
                self.progress.deactivate();
                tracing::error!(error = %e, "Generation job failed");
                Err(SubmitError::Generate(e))
            }
        }
    }

    /// Copy of the current progress record.
    ///
    /// Never blocked by a running job; safe to call before any job has run
    /// and after the last one finished.
    pub fn progress(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }
}

/// First `max` bytes of `s` on a char boundary, for log lines.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
