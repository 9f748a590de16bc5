use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use edu_lesson_types::{GeneratedResource, GenerationRequest, ResourceType, SlotRecord};
use serde::Deserialize;

use crate::error::{GenerateError, Result};
use crate::pipeline::Pipeline;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceGenerateRequest {
    pub transcript: String,
    /// Slots the caller already knows; they win over what the transcript says.
    #[serde(default)]
    pub overrides: SlotRecord,
    /// Forces a resource type instead of classifying the transcript.
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|e| GenerateError::InvalidBody(e.body_text()))
}

#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated resource", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Generation credentials missing or rejected", body = crate::error::ErrorResponse),
        (status = 502, description = "Generation returned an unusable response", body = crate::error::ErrorResponse),
        (status = 503, description = "Generation service unavailable", body = crate::error::ErrorResponse),
    ),
    tag = "generate",
)]
pub async fn generate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GeneratedResource>> {
    let request = body(payload)?;
    let resource = state.pipeline.generate(&request).await?;
    Ok(Json(resource))
}

#[utoipa::path(
    post,
    path = "/api/generate/voice",
    request_body = VoiceGenerateRequest,
    responses(
        (status = 200, description = "Generated resource", body = serde_json::Value),
        (status = 400, description = "Transcript is missing subject, grade, or topic", body = crate::error::ErrorResponse),
        (status = 403, description = "Generation credentials missing or rejected", body = crate::error::ErrorResponse),
        (status = 502, description = "Generation returned an unusable response", body = crate::error::ErrorResponse),
        (status = 503, description = "Generation service unavailable", body = crate::error::ErrorResponse),
    ),
    tag = "generate",
)]
pub async fn generate_from_voice(
    State(state): State<AppState>,
    payload: std::result::Result<Json<VoiceGenerateRequest>, JsonRejection>,
) -> Result<Json<GeneratedResource>> {
    let payload = body(payload)?;

    let intent = edu_intent::analyze(&payload.transcript);
    tracing::info!(
        category = %intent.category,
        resource_type = %intent.resource_type,
        "voice_request_analyzed"
    );

    let request = Pipeline::request_from_intent(&intent, &payload.overrides, payload.resource_type)?;
    let resource = state.pipeline.generate(&request).await?;
    Ok(Json(resource))
}
