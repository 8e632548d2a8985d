//! Frame Viz HTTP Server
//!
//! The application boundary: accepts the uploaded geometry document, the load
//! table and the deformation-scale control, and returns renderable scenes.
//! The actual solve is delegated to the engine service at `SOLVER_URL`.

use anyhow::Context;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use frame_viz::error::{FrameError, FrameResult};
use frame_viz::pipeline::{self, AnalysisView};
use frame_viz::prelude::*;

/// Upper bound of the deformation-scale control
const DEFORMATION_SCALE_MAX: f64 = 5000.0;

fn default_deformation_scale() -> f64 {
    1000.0
}

#[derive(Clone)]
struct AppState {
    solver_url: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct GeometryRequest {
    geometry: Option<GeometryFile>,
    #[serde(default)]
    loads: Vec<LoadEntry>,
}

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    geometry: Option<GeometryFile>,
    #[serde(default)]
    loads: Vec<LoadEntry>,
    #[serde(default = "default_deformation_scale")]
    deformation_scale: f64,
}

#[derive(Debug, Serialize)]
struct SceneResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scene: Option<Scene>,
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<AnalysisView>,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn geometry(Json(request): Json<GeometryRequest>) -> impl IntoResponse {
    match build_preview(request) {
        Ok(scene) => (
            StatusCode::OK,
            Json(SceneResponse {
                success: true,
                error: None,
                scene: Some(scene),
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(SceneResponse {
                success: false,
                error: Some(e.to_string()),
                scene: None,
            }),
        ),
    }
}

fn build_preview(request: GeometryRequest) -> FrameResult<Scene> {
    let geometry = request.geometry.ok_or(FrameError::MissingGeometry)?;
    pipeline::preview(&geometry.beams, &request.loads)
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> impl IntoResponse {
    // the pipeline blocks on the engine call, so it runs off the async runtime
    let outcome =
        tokio::task::spawn_blocking(move || run_analysis(request, state.solver_url)).await;

    match outcome {
        Ok(Ok(results)) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Ok(Err(e)) => (
            StatusCode::BAD_REQUEST,
            Json(AnalysisResponse {
                success: false,
                error: Some(e.to_string()),
                results: None,
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AnalysisResponse {
                success: false,
                error: Some(e.to_string()),
                results: None,
            }),
        ),
    }
}

fn run_analysis(request: AnalysisRequest, solver_url: String) -> FrameResult<AnalysisView> {
    let geometry = request.geometry.ok_or(FrameError::MissingGeometry)?;
    let scale = request.deformation_scale.clamp(0.0, DEFORMATION_SCALE_MAX);

    // fresh engine session per request
    let solver = RemoteSolver::new(solver_url);
    pipeline::analyze(&geometry.beams, &request.loads, scale, solver)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let solver_url =
        std::env::var("SOLVER_URL").unwrap_or_else(|_| "http://localhost:8086".to_string());
    let state = AppState { solver_url };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/geometry", post(geometry))
        .route("/api/v1/analyze", post(analyze))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8090));
    println!("Frame Viz Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Geometry:     POST /api/v1/geometry");
    println!("  Analysis:     POST /api/v1/analyze");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind server address")?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
