//! Route table for the API server.
//!
//! The health/status route mounts at the root; the generation API mounts
//! under `/sdapi/v1` (the SD-WebUI path family the original clients use).

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod sdapi;

/// All routes nested under `/sdapi/v1`.
pub fn sdapi_routes() -> Router<AppState> {
    sdapi::router()
}
