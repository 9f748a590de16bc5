use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edu_lesson_types::ValidationError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    /// Model output that could not be used, attached for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Generation(#[from] edu_llm_client::Error),

    #[error("Generated resource is missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String>, raw: String },

    #[error(transparent)]
    Prompt(#[from] edu_template_lesson::Error),
}

impl GenerateError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Generation(err) if err.is_credentials() => StatusCode::FORBIDDEN,
            Self::Generation(edu_llm_client::Error::ServiceUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Generation(_) | Self::MissingFields { .. } => StatusCode::BAD_GATEWAY,
            Self::Prompt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The unusable model output behind a `generation_failed` error, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::Generation(edu_llm_client::Error::MalformedOutput { raw }) => Some(raw),
            Self::MissingFields { raw, .. } => Some(raw),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.status() {
            StatusCode::BAD_REQUEST => "invalid_request",
            StatusCode::FORBIDDEN => "configuration_error",
            StatusCode::SERVICE_UNAVAILABLE => "generation_unavailable",
            StatusCode::BAD_GATEWAY => "generation_failed",
            _ => "internal_server_error",
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let raw = self.raw_output().map(str::to_string);

        let message = match &self {
            Self::InvalidRequest(_) | Self::InvalidBody(_) => self.to_string(),
            Self::Generation(err) if err.is_credentials() => {
                tracing::error!(error = %err, "generation_credentials_error");
                "Generation service is not configured".to_string()
            }
            Self::Generation(err @ edu_llm_client::Error::ServiceUnavailable { .. }) => {
                tracing::error!(error = %err, "generation_unavailable");
                "Generation service is unavailable, please try again".to_string()
            }
            Self::Generation(edu_llm_client::Error::MalformedOutput { raw }) => {
                tracing::error!(raw = %raw, "generation_failed");
                sentry::capture_message(&self.to_string(), sentry::Level::Error);
                "Generation returned an unusable response".to_string()
            }
            Self::Generation(_) | Self::MissingFields { .. } => {
                tracing::error!(error = %self, "generation_failed");
                sentry::capture_message(&self.to_string(), sentry::Level::Error);
                "Generation returned an unusable response".to_string()
            }
            Self::Prompt(err) => {
                tracing::error!(error = %err, "internal_error");
                sentry::capture_message(&err.to_string(), sentry::Level::Error);
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
                raw,
            },
        });

        (status, body).into_response()
    }
}
