//! Handlers for the generation endpoints.
//!
//! Routes:
//! - `POST /sdapi/v1/txt2img`  -- run one generation, blocking until done
//! - `POST /sdapi/v1/img2img`  -- wire-compatibility alias of txt2img
//! - `GET  /sdapi/v1/progress` -- snapshot of the current job's progress

use std::io::Cursor;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use base64::Engine as _;
use image::RgbImage;
use imagegen_core::job::JobSpec;
use imagegen_core::progress::ProgressSnapshot;
use imagegen_core::seed::RANDOM_SEED;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::GenerateResponse;
use crate::state::AppState;

/// Request body for the generation endpoints.
///
/// Field names and defaults match the SD-WebUI API. `override_settings`,
/// `init_images` and `denoising_strength` are accepted for client
/// compatibility but not interpreted by this server.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f32,
    #[serde(default = "default_seed")]
    pub seed: i64,
    #[serde(default)]
    pub override_settings: Option<serde_json::Value>,
    #[serde(default = "default_true")]
    pub override_settings_restore_afterwards: bool,
    #[serde(default)]
    pub init_images: Option<Vec<String>>,
    #[serde(default = "default_denoising_strength")]
    pub denoising_strength: f32,
}

fn default_dimension() -> u32 {
    1024
}

fn default_steps() -> u32 {
    28
}

fn default_cfg_scale() -> f32 {
    7.0
}

fn default_seed() -> i64 {
    RANDOM_SEED
}

fn default_true() -> bool {
    true
}

fn default_denoising_strength() -> f32 {
    0.75
}

impl GenerateRequest {
    fn into_job(self) -> JobSpec {
        JobSpec {
            prompt: self.prompt,
            negative_prompt: self.negative_prompt,
            width: self.width,
            height: self.height,
            steps: self.steps,
            cfg_scale: self.cfg_scale,
            seed: self.seed,
        }
    }
}

/// POST /sdapi/v1/txt2img
///
/// Validates the request, runs the generation to completion, and returns
/// the final image base64-encoded along with the seed actually used.
pub async fn txt2img(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let job = input.into_job();
    job.validate().map_err(AppError::Core)?;

    let generated = state.coordinator.submit(job).await?;
    let encoded = encode_png_base64(&generated.image)?;

    Ok(Json(GenerateResponse {
        images: vec![encoded],
        parameters: serde_json::json!({}),
        info: serde_json::json!({ "seed": generated.seed }).to_string(),
    }))
}

/// POST /sdapi/v1/img2img
///
/// Accepted for wire compatibility; behaves exactly like txt2img (init
/// images are accepted and unused).
pub async fn img2img(
    state: State<AppState>,
    input: Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    txt2img(state, input).await
}

/// GET /sdapi/v1/progress
///
/// Returns the latest committed progress snapshot. Never blocks on a
/// running job and always succeeds, including before the first job and
/// after the last one finished.
pub async fn progress(State(state): State<AppState>) -> Json<ProgressSnapshot> {
    Json(state.coordinator.progress())
}

/// Encode an image as a base64 PNG string.
fn encode_png_base64(image: &RgbImage) -> AppResult<String> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| AppError::InternalError(format!("Failed to encode image: {e}")))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(buf.into_inner()))
}
