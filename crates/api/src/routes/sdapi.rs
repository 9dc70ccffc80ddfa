//! Route definitions for the generation API.
//!
//! ```text
//! POST /txt2img     generation::txt2img
//! POST /img2img     generation::img2img
//! GET  /progress    generation::progress
//! GET  /sd-models   models::list_models
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generation, models};
use crate::state::AppState;

/// Routes nested under `/sdapi/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/txt2img", post(generation::txt2img))
        .route("/img2img", post(generation::img2img))
        .route("/progress", get(generation::progress))
        .route("/sd-models", get(models::list_models))
}
