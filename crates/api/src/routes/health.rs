use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Status response payload.
#[derive(Serialize)]
pub struct StatusResponse {
    /// Overall service status.
    pub status: &'static str,
    /// The configured model name.
    pub model: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET / -- returns service status and the served model.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        model: state.config.model_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount status routes (intended for root-level, NOT under `/sdapi/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(status))
}
