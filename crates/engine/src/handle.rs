//! The pipeline handle: lazy one-time initialisation plus job execution.
//!
//! [`PipelineHandle`] hides the cost and failure surface of acquiring the
//! diffusion pipeline. The first job pays for the load; every later job
//! reuses the cached model. Loading and generation both run on blocking
//! threads so the async runtime is never stalled.

use std::sync::Arc;

use imagegen_core::job::JobSpec;
use imagegen_core::seed;
use tokio::sync::OnceCell;

use crate::error::{GenerateError, InitError};
use crate::model::{DiffusionModel, Generated, ModelLoader};

/// Process-lifetime wrapper around the lazily initialised pipeline.
pub struct PipelineHandle {
    loader: Arc<dyn ModelLoader>,
    model: OnceCell<Arc<dyn DiffusionModel>>,
}

impl PipelineHandle {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            model: OnceCell::new(),
        }
    }

    /// Load the pipeline if it is not loaded yet, and return it.
    ///
    /// Idempotent: the first caller runs the loader (on a blocking thread);
    /// concurrent callers await that same initialisation rather than paying
    /// for their own. On failure the cache stays empty, so a later call
    /// retries the load.
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn DiffusionModel>, InitError> {
        let model = self
            .model
            .get_or_try_init(|| {
                let loader = Arc::clone(&self.loader);
                async move {
                    tracing::info!("Loading diffusion pipeline");
                    let model = tokio::task::spawn_blocking(move || loader.load())
                        .await
                        .map_err(|e| InitError::Load(format!("loader task aborted: {e}")))??;
                    tracing::info!("Diffusion pipeline ready");
                    Ok(model)
                }
            })
            .await?;

        Ok(Arc::clone(model))
    }

    /// Execute one job to completion on a blocking thread.
    ///
    /// Resolves the requested seed, then runs the model for `job.steps`
    /// steps. `on_step(i)` is invoked synchronously after each completed
    /// step, in strictly increasing order, before the next step begins; it
    /// must be fast and must not block.
    pub async fn run<F>(&self, job: JobSpec, mut on_step: F) -> Result<Generated, GenerateError>
    where
        F: FnMut(u32) + Send + 'static,
    {
        let model = self.ensure_loaded().await?;
        let seed = seed::resolve(job.seed);

        let result = tokio::task::spawn_blocking(move || {
            let image = model.generate(&job, seed, &mut on_step)?;
            Ok(Generated { image, seed })
        })
        .await;

        match result {
            Ok(generated) => generated,
            Err(e) => Err(GenerateError::TaskAborted(e.to_string())),
        }
    }
}
