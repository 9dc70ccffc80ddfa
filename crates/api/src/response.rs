//! Shared response payload types for API handlers.
//!
//! The generation endpoints keep the wire shape of the SD-WebUI API family
//! (`images` as base64 strings, an `info` JSON string carrying the seed) so
//! existing clients work unchanged.

use serde::Serialize;

/// Response body for `POST /sdapi/v1/txt2img` and `/img2img`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Base64-encoded PNGs; this server always returns exactly one.
    pub images: Vec<String>,
    /// Echo slot kept for wire compatibility; always an empty object.
    pub parameters: serde_json::Value,
    /// JSON string with generation metadata (`{"seed": N}`).
    pub info: String,
}

/// One entry of the `GET /sdapi/v1/sd-models` listing.
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub title: String,
    pub model_name: String,
    pub description: String,
    pub hash: String,
    pub sha256: String,
    pub filename: String,
}
