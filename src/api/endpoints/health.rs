//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub classes: usize,
    pub features: usize,
    pub started_at: String,
}

/// `GET /api/health` — liveness plus a summary of the loaded model.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let classifier = ctx.core.classifier();
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        classes: classifier.classes().len(),
        features: classifier.n_features(),
        started_at: ctx.core.started_at.to_rfc3339(),
    })
}
