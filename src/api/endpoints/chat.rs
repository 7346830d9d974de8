//! Chat endpoint.
//!
//! `POST /chat` (and `POST /api/chat`) takes `{"message"?, "symptoms"?}`
//! and answers with either a diagnosis or a canned text reply.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chat::{self, ChatRequest, ChatResponse};

pub async fn send(
    State(ctx): State<ApiContext>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let response = chat::respond(&ctx.core, &req)?;
    Ok(Json(response))
}
