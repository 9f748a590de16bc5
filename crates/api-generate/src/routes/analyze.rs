use axum::Json;
use axum::extract::rejection::JsonRejection;
use edu_intent::Intent;
use serde::Deserialize;

use crate::error::{GenerateError, Result};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeRequest {
    pub transcript: String,
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Detected resource type and slots", body = Intent),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    ),
    tag = "generate",
)]
pub async fn analyze(payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>) -> Result<Json<Intent>> {
    let Json(payload) = payload.map_err(|e| GenerateError::InvalidBody(e.body_text()))?;
    Ok(Json(edu_intent::analyze(&payload.transcript)))
}
