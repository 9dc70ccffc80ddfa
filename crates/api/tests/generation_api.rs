//! Integration tests for the generation endpoints.
//!
//! These run real (small) generations through the procedural pipeline via
//! the full middleware stack: request validation, the blocking submit path,
//! inline PNG encoding, and the progress endpoint's lifecycle states.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use base64::Engine as _;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// A small, fast job so the tests stay quick.
fn small_job(seed: i64) -> serde_json::Value {
    serde_json::json!({
        "prompt": "a lighthouse in a storm",
        "negative_prompt": "blurry",
        "width": 64,
        "height": 64,
        "steps": 4,
        "cfg_scale": 7.0,
        "seed": seed,
    })
}

async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: txt2img returns a PNG and echoes the explicit seed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn txt2img_returns_png_and_seed() {
    let app = common::build_test_app();

    let (status, body) = post_json(&app, "/sdapi/v1/txt2img", small_job(5)).await;
    assert_eq!(status, StatusCode::OK);

    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);

    // The image must be a decodable base64 PNG.
    let png = base64::engine::general_purpose::STANDARD
        .decode(images[0].as_str().unwrap())
        .unwrap();
    assert!(png.starts_with(b"\x89PNG"));

    // The info string carries the seed that was used.
    let info: serde_json::Value = serde_json::from_str(body["info"].as_str().unwrap()).unwrap();
    assert_eq!(info["seed"], 5);
}

// ---------------------------------------------------------------------------
// Test: a random-seed request resolves and reports a concrete seed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn txt2img_resolves_random_seed() {
    let app = common::build_test_app();

    let (status, body) = post_json(&app, "/sdapi/v1/txt2img", small_job(-1)).await;
    assert_eq!(status, StatusCode::OK);

    let info: serde_json::Value = serde_json::from_str(body["info"].as_str().unwrap()).unwrap();
    let seed = info["seed"].as_u64().unwrap();
    assert!(seed <= u64::from(u32::MAX));
}

// ---------------------------------------------------------------------------
// Test: identical requests render identical images
// ---------------------------------------------------------------------------

#[tokio::test]
async fn txt2img_is_deterministic_for_fixed_seed() {
    let app = common::build_test_app();

    let (_, first) = post_json(&app, "/sdapi/v1/txt2img", small_job(42)).await;
    let (_, second) = post_json(&app, "/sdapi/v1/txt2img", small_job(42)).await;

    assert_eq!(first["images"][0], second["images"][0]);
}

// ---------------------------------------------------------------------------
// Test: img2img is an alias of txt2img
// ---------------------------------------------------------------------------

#[tokio::test]
async fn img2img_behaves_like_txt2img() {
    let app = common::build_test_app();

    let mut body = small_job(7);
    body["init_images"] = serde_json::json!(["<ignored>"]);
    body["denoising_strength"] = serde_json::json!(0.6);

    let (status, response) = post_json(&app, "/sdapi/v1/img2img", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["images"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: request defaults apply when fields are omitted
// ---------------------------------------------------------------------------

#[tokio::test]
async fn txt2img_applies_defaults_for_missing_fields() {
    let app = common::build_test_app();

    // Only override size and steps to keep the render fast; prompt, cfg and
    // seed fall back to their defaults (empty, 7.0, random).
    let (status, body) = post_json(
        &app,
        "/sdapi/v1/txt2img",
        serde_json::json!({ "width": 64, "height": 64, "steps": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let info: serde_json::Value = serde_json::from_str(body["info"].as_str().unwrap()).unwrap();
    assert!(info["seed"].is_u64());
}

// ---------------------------------------------------------------------------
// Test: invalid parameters are rejected with a validation error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn txt2img_rejects_invalid_dimensions() {
    let app = common::build_test_app();

    let mut body = small_job(5);
    body["width"] = serde_json::json!(100); // not a multiple of 8

    let (status, response) = post_json(&app, "/sdapi/v1/txt2img", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn txt2img_rejects_zero_steps() {
    let app = common::build_test_app();

    let mut body = small_job(5);
    body["steps"] = serde_json::json!(0);

    let (status, response) = post_json(&app, "/sdapi/v1/txt2img", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: progress lifecycle across the job boundary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn progress_is_idle_before_any_job() {
    let app = common::build_test_app();

    let (status, body) = get_json(&app, "/sdapi/v1/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], 0);
    assert_eq!(body["total_steps"], 0);
    assert_eq!(body["percentage"], 0.0);
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn progress_shows_finalised_state_after_a_job() {
    let app = common::build_test_app();

    post_json(&app, "/sdapi/v1/txt2img", small_job(5)).await;

    let (status, body) = get_json(&app, "/sdapi/v1/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], 4);
    assert_eq!(body["total_steps"], 4);
    assert_eq!(body["percentage"], 100.0);
    assert_eq!(body["active"], false);
}

// ---------------------------------------------------------------------------
// Test: model listing reflects the configured model
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sd_models_lists_the_configured_model() {
    let app = common::build_test_app();

    let (status, body) = get_json(&app, "/sdapi/v1/sd-models").await;
    assert_eq!(status, StatusCode::OK);

    let models = body.as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0]["title"], "test-model-v1");
    assert_eq!(models[0]["model_name"], "Test Model V1");
    assert_eq!(models[0]["filename"], "test-lab/test-model-v1");
}
