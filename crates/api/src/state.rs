use std::sync::Arc;

use imagegen_engine::GenerationCoordinator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The generation coordinator: owns the pipeline and the progress record.
    pub coordinator: Arc<GenerationCoordinator>,
}
