//! The engine seam: traits implemented by diffusion backends.
//!
//! The service treats the generative computation as an opaque step-emitting
//! engine. A backend implements [`DiffusionModel`] (run one job, blocking,
//! reporting each completed step) and [`ModelLoader`] (the slow, fallible
//! acquisition of that model). Both are blocking by design -- the pipeline
//! is CPU/GPU-bound work that the coordinator moves onto
//! `tokio::task::spawn_blocking`.

use std::sync::Arc;

use image::RgbImage;
use imagegen_core::job::JobSpec;

use crate::error::{GenerateError, InitError};

/// A loaded, ready-to-run diffusion pipeline.
///
/// Implementations must be immutable after loading: one instance is shared
/// by every job for the rest of the process lifetime.
pub trait DiffusionModel: Send + Sync {
    /// Execute the full iterative computation for `job.steps` steps.
    ///
    /// After completing step `i` (1-indexed), the implementation must invoke
    /// `on_step(i)` synchronously, before beginning step `i + 1`. Step
    /// progress already reported is not retracted on failure.
    fn generate(
        &self,
        job: &JobSpec,
        seed: u64,
        on_step: &mut dyn FnMut(u32),
    ) -> Result<RgbImage, GenerateError>;
}

/// One-time acquisition of a [`DiffusionModel`].
///
/// `load` is slow and fallible (network, missing weights, hardware). It is
/// called at most once per successful initialisation; on failure a later
/// job triggers a fresh attempt.
pub trait ModelLoader: Send + Sync + 'static {
    fn load(&self) -> Result<Arc<dyn DiffusionModel>, InitError>;
}

/// The output of one completed job.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The final rendered image.
    pub image: RgbImage,
    /// The seed actually used, after resolving a random-seed request.
    pub seed: u64,
}
