//! Generation engine: pipeline lifecycle and progress tracking.
//!
//! Owns the two pieces of shared mutable state in the service: the lazily
//! initialised diffusion pipeline and the progress record read by concurrent
//! pollers. [`GenerationCoordinator`] is the only entry point handlers use;
//! it serialises job execution against the single pipeline and keeps the
//! progress record consistent across the job lifecycle.

pub mod coordinator;
pub mod error;
pub mod handle;
pub mod model;
pub mod procedural;
pub mod progress;

pub use coordinator::{BusyPolicy, GenerationCoordinator};
pub use error::{GenerateError, InitError, SubmitError};
pub use handle::PipelineHandle;
pub use model::{DiffusionModel, Generated, ModelLoader};
