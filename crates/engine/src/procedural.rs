//! Built-in procedural diffusion backend.
//!
//! A self-contained [`DiffusionModel`] used as the default backend and by
//! tests: it renders a seeded color field by iteratively blending a noise
//! buffer toward a target image, one blend pass per denoising step. Output
//! is fully deterministic for identical (prompt, negative prompt, size,
//! steps, cfg_scale, seed), so a caller re-submitting with the seed echoed
//! in a previous response reproduces the image exactly.

use std::sync::Arc;

use image::RgbImage;
use imagegen_core::job::JobSpec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::error::{GenerateError, InitError};
use crate::model::{DiffusionModel, ModelLoader};

/// Number of sinusoidal octaves composing the target field.
const OCTAVES: usize = 4;

/// Loader for the procedural backend.
pub struct ProceduralLoader {
    model_id: String,
}

impl ProceduralLoader {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

impl ModelLoader for ProceduralLoader {
    fn load(&self) -> Result<Arc<dyn DiffusionModel>, InitError> {
        tracing::debug!(model_id = %self.model_id, "Initialising procedural pipeline");
        Ok(Arc::new(ProceduralPipeline {
            model_id: self.model_id.clone(),
        }))
    }
}

/// The procedural pipeline itself. Immutable after load.
pub struct ProceduralPipeline {
    model_id: String,
}

impl DiffusionModel for ProceduralPipeline {
    fn generate(
        &self,
        job: &JobSpec,
        seed: u64,
        on_step: &mut dyn FnMut(u32),
    ) -> Result<RgbImage, GenerateError> {
        tracing::debug!(
            model_id = %self.model_id,
            seed,
            steps = job.steps,
            "Procedural render",
        );

        let width = job.width as usize;
        let height = job.height as usize;
        let mut rng = StdRng::seed_from_u64(seed ^ prompt_key(&job.prompt, &job.negative_prompt));

        // Conditioning: a palette and a stack of sinusoidal octaves, all
        // drawn from the seeded RNG.
        let palette: [[f32; 3]; 3] = std::array::from_fn(|_| std::array::from_fn(|_| rng.random()));
        let octaves: [Octave; OCTAVES] = std::array::from_fn(|_| Octave {
            fx: rng.random_range(0.2..6.0) * std::f32::consts::TAU / width as f32,
            fy: rng.random_range(0.2..6.0) * std::f32::consts::TAU / height as f32,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            amplitude: rng.random_range(0.3..1.0),
        });

        let target = render_target(width, height, &palette, &octaves);

        // The latent starts as pure noise and is blended toward the target
        // once per step. Higher guidance converges faster.
        let mut latent: Vec<f32> = (0..width * height * 3).map(|_| rng.random()).collect();
        let blend = 0.25 + (job.cfg_scale.clamp(0.0, 30.0) / 30.0) * 0.5;

        for step in 1..=job.steps {
            for (value, goal) in latent.iter_mut().zip(&target) {
                *value += (goal - *value) * blend;
            }
            on_step(step);
        }

        let image = RgbImage::from_fn(job.width, job.height, |x, y| {
            let base = (y as usize * width + x as usize) * 3;
            image::Rgb([
                to_channel(latent[base]),
                to_channel(latent[base + 1]),
                to_channel(latent[base + 2]),
            ])
        });

        Ok(image)
    }
}

/// One sinusoidal component of the target field.
struct Octave {
    fx: f32,
    fy: f32,
    phase: f32,
    amplitude: f32,
}

/// Render the target color field the latent converges toward.
fn render_target(
    width: usize,
    height: usize,
    palette: &[[f32; 3]; 3],
    octaves: &[Octave; OCTAVES],
) -> Vec<f32> {
    let max_amplitude: f32 = octaves.iter().map(|o| o.amplitude).sum();
    let mut target = Vec::with_capacity(width * height * 3);

    for y in 0..height {
        for x in 0..width {
            let mut g = 0.0f32;
            for o in octaves {
                g += o.amplitude * (x as f32 * o.fx + y as f32 * o.fy + o.phase).sin();
            }
            // Normalise into 0..1 and interpolate across the three anchors.
            let g = (g / max_amplitude + 1.0) / 2.0;
            let color = palette_lookup(palette, g.clamp(0.0, 1.0));
            target.extend_from_slice(&color);
        }
    }

    target
}

/// Piecewise-linear interpolation across the three palette anchors.
fn palette_lookup(palette: &[[f32; 3]; 3], g: f32) -> [f32; 3] {
    let (lo, hi, t) = if g < 0.5 {
        (palette[0], palette[1], g * 2.0)
    } else {
        (palette[1], palette[2], (g - 0.5) * 2.0)
    };
    std::array::from_fn(|c| lo[c] + (hi[c] - lo[c]) * t)
}

/// Stable 64-bit conditioning key for a prompt pair.
fn prompt_key(prompt: &str, negative_prompt: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hasher.update([0xff]);
    hasher.update(negative_prompt.as_bytes());
    let digest = hasher.finalize();
    let mut key = [0u8; 8];
    key.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(key)
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
