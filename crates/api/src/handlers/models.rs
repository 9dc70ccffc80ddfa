//! Handler for the model listing endpoint.
//!
//! The service fronts a single configured model, so the listing is static
//! descriptive metadata with no state interaction.

use axum::extract::State;
use axum::Json;

use crate::response::ModelInfo;
use crate::state::AppState;

/// GET /sdapi/v1/sd-models
pub async fn list_models(State(state): State<AppState>) -> Json<Vec<ModelInfo>> {
    let config = &state.config;

    Json(vec![ModelInfo {
        title: config.model_id.rsplit('/').next().unwrap_or_default().to_string(),
        model_name: config.model_name.clone(),
        description: "Anime / manga generation (SDXL fine-tune)".to_string(),
        hash: String::new(),
        sha256: String::new(),
        filename: config.model_id.clone(),
    }])
}
