//! API routes for postured.

use crate::analyzer::AnalysisError;
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use posture_common::{AnalysisResult, AssessmentForm};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub assessment: AssessmentForm,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn analysis_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/analyze", post(analyze))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

async fn analyze(
    State(state): State<AppStateArc>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, Json<ErrorResponse>)> {
    let result = state.analyzer.invoke(&req.assessment).await.map_err(|e| {
        (
            status_for(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(result))
}

/// HTTP status for each terminal analysis outcome. Provider and shape
/// failures are upstream faults, hence 502 rather than 500.
fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
        AnalysisError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        AnalysisError::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
        AnalysisError::Provider(_) | AnalysisError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
    }
}

async fn health() -> Json<HealthResponse> {
    info!("Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
