//! Generation job parameters and validation.
//!
//! A [`JobSpec`] is the validated, transport-independent description of one
//! generation: the engine consumes it verbatim, the API layer builds it from
//! the wire request. Validation happens once, up front, so the engine never
//! sees out-of-range parameters.

use crate::error::CoreError;
use crate::seed::RANDOM_SEED;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest accepted image edge, in pixels.
pub const MIN_DIMENSION: u32 = 64;

/// Largest accepted image edge, in pixels.
pub const MAX_DIMENSION: u32 = 2048;

/// Image edges must be a multiple of this (latent-space downscale factor).
pub const DIMENSION_STEP: u32 = 8;

/// Smallest accepted step count.
pub const MIN_STEPS: u32 = 1;

/// Largest accepted step count.
pub const MAX_STEPS: u32 = 150;

/// Largest accepted guidance scale.
pub const MAX_CFG_SCALE: f32 = 30.0;

/// Maximum prompt length in bytes.
pub const MAX_PROMPT_BYTES: usize = 128 * 1024;

// ---------------------------------------------------------------------------
// Job spec
// ---------------------------------------------------------------------------

/// Parameters for one generation job.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Positive prompt text.
    pub prompt: String,
    /// Negative prompt text (may be empty).
    pub negative_prompt: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of denoising steps to run.
    pub steps: u32,
    /// Classifier-free guidance scale.
    pub cfg_scale: f32,
    /// Requested seed; [`RANDOM_SEED`] means "draw one".
    pub seed: i64,
}

impl JobSpec {
    /// Validate all parameters against the accepted ranges.
    ///
    /// Rules:
    /// - width and height within `MIN_DIMENSION..=MAX_DIMENSION`, each a
    ///   multiple of `DIMENSION_STEP`;
    /// - steps within `MIN_STEPS..=MAX_STEPS`;
    /// - cfg_scale within `0.0..=MAX_CFG_SCALE` and finite;
    /// - prompt at most `MAX_PROMPT_BYTES`;
    /// - seed is `RANDOM_SEED` or non-negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)?;

        if self.steps < MIN_STEPS || self.steps > MAX_STEPS {
            return Err(CoreError::Validation(format!(
                "steps must be between {MIN_STEPS} and {MAX_STEPS}, got {}",
                self.steps
            )));
        }

        if !self.cfg_scale.is_finite() || self.cfg_scale < 0.0 || self.cfg_scale > MAX_CFG_SCALE {
            return Err(CoreError::Validation(format!(
                "cfg_scale must be between 0 and {MAX_CFG_SCALE}, got {}",
                self.cfg_scale
            )));
        }

        if self.prompt.len() > MAX_PROMPT_BYTES {
            return Err(CoreError::Validation(format!(
                "prompt too large ({} bytes); maximum is {MAX_PROMPT_BYTES} bytes",
                self.prompt.len()
            )));
        }

        if self.seed < RANDOM_SEED {
            return Err(CoreError::Validation(format!(
                "seed must be {RANDOM_SEED} (random) or non-negative, got {}",
                self.seed
            )));
        }

        Ok(())
    }
}

/// Validate a single image dimension.
fn validate_dimension(name: &str, value: u32) -> Result<(), CoreError> {
    if value < MIN_DIMENSION || value > MAX_DIMENSION {
        return Err(CoreError::Validation(format!(
            "{name} must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
        )));
    }
    if value % DIMENSION_STEP != 0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a multiple of {DIMENSION_STEP}, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
