//! HTTP request handlers for the hex engine.

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};

use hex_common::{axial, HexError};
use renderer::{extract_hex_region, generate_grid_view};

use crate::state::AppState;

/// GET /api/hex-region/:image_id/:q/:r
///
/// PNG cutout of one hex cell. Out-of-bounds hexes return the transparent
/// sentinel image with a 200, not an error.
#[instrument(skip(state))]
pub async fn hex_region_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((image_id, q, r)): Path<(String, i32, i32)>,
) -> Response {
    let (source, width, height) = match state.images.read_image(&image_id) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    info!(image = %image_id, q = q, r = r, "Extracting hex region");

    // Decode/encode is the slow part; keep it off the async reactor.
    let result =
        tokio::task::spawn_blocking(move || extract_hex_region(&source, q, r, width, height))
            .await;

    match result {
        Ok(Ok(png_data)) => png_response(png_data),
        Ok(Err(e)) => {
            error!(error = %e, image = %image_id, "Hex extraction failed");
            error_response(&e)
        }
        Err(e) => error_response(&HexError::InternalError(format!("render task failed: {}", e))),
    }
}

/// GET /api/hex-grid-view/:image_id/:q/:r
///
/// Annotated crop around a center hex: neighborhood outlines in green, the
/// center cell highlighted in red.
#[instrument(skip(state))]
pub async fn grid_view_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((image_id, q, r)): Path<(String, i32, i32)>,
) -> Response {
    let (source, width, height) = match state.images.read_image(&image_id) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    info!(image = %image_id, q = q, r = r, "Rendering grid view");

    let result =
        tokio::task::spawn_blocking(move || generate_grid_view(&source, q, r, width, height))
            .await;

    match result {
        Ok(Ok(png_data)) => png_response(png_data),
        Ok(Err(e)) => {
            error!(error = %e, image = %image_id, "Grid view rendering failed");
            error_response(&e)
        }
        Err(e) => error_response(&HexError::InternalError(format!("render task failed: {}", e))),
    }
}

/// GET /api/grid-dimensions/:image_id
#[instrument(skip(state))]
pub async fn grid_dimensions_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Response {
    match state.images.entry(&image_id) {
        Ok(entry) => {
            let dims = axial::grid_dimensions(entry.width, entry.height);
            Json(dims).into_response()
        }
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct LocateParams {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct LocateResponse {
    q: i32,
    r: i32,
}

/// GET /api/locate/:image_id?x=&y=
///
/// Server-side mirror of client hit-testing: resolves a pixel position on
/// the recorded image to its axial coordinate.
#[instrument(skip(state))]
pub async fn locate_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(image_id): Path<String>,
    Query(params): Query<LocateParams>,
) -> Response {
    let entry = match state.images.entry(&image_id) {
        Ok(e) => e,
        Err(e) => return error_response(&e),
    };

    if !params.x.is_finite()
        || !params.y.is_finite()
        || params.x < 0.0
        || params.y < 0.0
        || params.x > entry.width as f64
        || params.y > entry.height as f64
    {
        return error_response(&HexError::InvalidParameter {
            param: "x/y".to_string(),
            message: format!(
                "position ({}, {}) outside image {}x{}",
                params.x, params.y, entry.width, entry.height
            ),
        });
    }

    let coord = axial::pixel_to_hex(params.x, params.y);
    Json(LocateResponse {
        q: coord.q,
        r: coord.r,
    })
    .into_response()
}

/// GET /health
pub async fn health_handler() -> Response {
    Json(serde_json::json!({ "status": "ok" })).into_response()
}

fn png_response(png_data: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(png_data.into())
        .unwrap()
}

/// Translate an engine/store error into a JSON error response.
fn error_response(err: &HexError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router;
    use axum::body::Body;
    use axum::http::Request;
    use image::{DynamicImage, RgbaImage};
    use std::fs;
    use std::io::Cursor;
    use tower::ServiceExt;

    fn test_state() -> (tempfile::TempDir, Arc<AppState>) {
        let dir = tempfile::tempdir().unwrap();

        let img = RgbaImage::from_pixel(400, 400, image::Rgba([10, 120, 200, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        fs::write(dir.path().join("world.png"), &bytes).unwrap();
        fs::write(
            dir.path().join("manifest.json"),
            r#"{"world": {"filename": "world.png", "width": 400, "height": 400}}"#,
        )
        .unwrap();

        let state = AppState::new(dir.path().to_str().unwrap()).unwrap();
        (dir, Arc::new(state))
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, state) = test_state();
        let app = router(state);
        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_hex_region_returns_png() {
        let (_dir, state) = test_state();
        let app = router(state);
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/hex-region/world/2/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
    }

    #[tokio::test]
    async fn test_unknown_image_is_404() {
        let (_dir, state) = test_state();
        let app = router(state);
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/hex-region/nope/0/0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_grid_dimensions_json() {
        let (_dir, state) = test_state();
        let app = router(state);
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/grid-dimensions/world")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        let dims: serde_json::Value = serde_json::from_slice(&body).unwrap();
        // 400px: ceil(400/75) = 6 cols, ceil(400/86.6) = 5 rows
        assert_eq!(dims["cols"], 6);
        assert_eq!(dims["rows"], 5);
    }

    #[tokio::test]
    async fn test_locate_resolves_click() {
        let (_dir, state) = test_state();
        let app = router(state);
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/locate/world?x=150.0&y=86.6")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        let coord: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let expected = axial::pixel_to_hex(150.0, 86.6);
        assert_eq!(coord["q"], expected.q);
        assert_eq!(coord["r"], expected.r);
    }

    #[tokio::test]
    async fn test_locate_outside_image_is_400() {
        let (_dir, state) = test_state();
        let app = router(state);
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/locate/world?x=5000&y=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_bounds_hex_is_sentinel_not_error() {
        let (_dir, state) = test_state();
        let app = router(state);
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/hex-region/world/1000/1000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), 1 << 20).await.unwrap();
        let decoded = image::load_from_memory(&body).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (100, 100));
        assert!(decoded.pixels().all(|p| p.0[3] == 0));
    }
}
