//! Symptom vocabulary endpoint, backing the client's symptom picker.

use axum::Json;
use serde::Serialize;

use crate::vocabulary::{Symptom, SYMPTOMS};

#[derive(Serialize)]
pub struct SymptomsResponse {
    pub symptoms: &'static [Symptom],
}

/// `GET /api/symptoms` — the recognized symptom tokens, in feature order.
pub async fn list() -> Json<SymptomsResponse> {
    Json(SymptomsResponse { symptoms: SYMPTOMS })
}
