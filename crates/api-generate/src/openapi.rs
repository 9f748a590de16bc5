use utoipa::OpenApi;

use crate::error::{ErrorDetails, ErrorResponse};
use crate::routes::{AnalyzeRequest, VoiceGenerateRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::generate::generate,
        crate::routes::generate::generate_from_voice,
        crate::routes::analyze::analyze,
    ),
    components(
        schemas(
            edu_lesson_types::GenerationRequest,
            edu_lesson_types::SlotRecord,
            edu_lesson_types::ResourceType,
            edu_lesson_types::ResourceCategory,
            edu_lesson_types::Subject,
            edu_lesson_types::Theme,
            edu_lesson_types::Format,
            edu_lesson_types::Difficulty,
            edu_lesson_types::QuestionType,
            edu_intent::Intent,
            AnalyzeRequest,
            VoiceGenerateRequest,
            ErrorResponse,
            ErrorDetails,
        )
    ),
    tags(
        (name = "generate", description = "Classroom resource generation")
    )
)]
struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
