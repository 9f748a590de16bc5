pub(crate) mod analyze;
pub(crate) mod generate;

use axum::{Router, routing::post};

use crate::config::GenerateConfig;
use crate::pipeline::Generator;
use crate::state::AppState;

pub use analyze::AnalyzeRequest;
pub use generate::VoiceGenerateRequest;

pub fn router(config: GenerateConfig) -> Router {
    if !config.client().is_configured() {
        tracing::warn!("openai_api_key_missing");
    }
    routes(AppState::new(&config))
}

/// Router over an arbitrary generator, for embedding or tests.
pub fn router_with_generator(generator: impl Generator + 'static) -> Router {
    routes(AppState::with_generator(generator))
}

fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate::generate))
        .route("/api/generate/voice", post(generate::generate_from_voice))
        .route("/api/analyze", post(analyze::analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::pipeline::testing::FakeGenerator;

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn quiz(n: usize) -> Value {
        let questions: Vec<Value> = (1..=n)
            .map(|i| json!({ "question": format!("q{i}"), "correct_answer": "a" }))
            .collect();
        json!({ "title": "Fractions Quiz", "questions": questions })
    }

    #[tokio::test]
    async fn generate_returns_reconciled_resource() {
        let router = router_with_generator(FakeGenerator::returning(quiz(2)));
        let (status, body) = post_json(
            router,
            "/api/generate",
            json!({
                "subject": "Math",
                "gradeLevel": "5th Grade",
                "resourceType": "quiz",
                "topicArea": "fractions",
                "questionCount": 4
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resourceType"], "quiz");
        assert_eq!(body["title"], "Fractions Quiz");
        assert_eq!(body["questions"].as_array().unwrap().len(), 4);
        assert_eq!(body["questions"][2]["question"], "q1 (variation 1)");
    }

    #[tokio::test]
    async fn validation_fails_before_generation() {
        let fake = FakeGenerator::returning(quiz(1));
        let calls = fake.calls.clone();
        let router = router_with_generator(fake);

        let (status, body) = post_json(
            router,
            "/api/generate",
            json!({ "subject": "Math", "gradeLevel": "5th Grade", "questionCount": 3 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
        assert!(body["error"]["message"].as_str().unwrap().contains("topicArea"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn question_count_out_of_range_is_rejected() {
        let router = router_with_generator(FakeGenerator::returning(quiz(1)));
        let (status, body) = post_json(
            router,
            "/api/generate",
            json!({
                "subject": "Math",
                "gradeLevel": "5th Grade",
                "topicArea": "fractions",
                "questionCount": 500
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("questionCount"));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let router = router_with_generator(FakeGenerator::returning(quiz(1)));
        let (status, body) =
            post_json(router, "/api/generate", json!({ "questionCount": "many" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn malformed_model_output_is_bad_gateway() {
        let router = router_with_generator(FakeGenerator::failing(
            edu_llm_client::Error::MalformedOutput {
                raw: "I cannot do that".into(),
            },
        ));
        let (status, body) = post_json(
            router,
            "/api/generate",
            json!({ "subject": "Science", "gradeLevel": "4th Grade", "topicArea": "plants" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "generation_failed");
        assert_eq!(body["error"]["raw"], "I cannot do that");
    }

    #[tokio::test]
    async fn missing_fields_attach_model_output() {
        let router = router_with_generator(FakeGenerator::returning(json!({ "title": "Plants" })));
        let (status, body) = post_json(
            router,
            "/api/generate",
            json!({ "subject": "Science", "gradeLevel": "4th Grade", "topicArea": "plants" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "generation_failed");
        assert_eq!(body["error"]["raw"], r#"{"title":"Plants"}"#);
    }

    #[tokio::test]
    async fn missing_credentials_are_configuration_errors() {
        let router = router_with_generator(FakeGenerator::failing(
            edu_llm_client::Error::MissingApiKey,
        ));
        let (status, body) = post_json(
            router,
            "/api/generate",
            json!({ "subject": "Art", "gradeLevel": "K", "topicArea": "colors" }),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "configuration_error");
    }

    #[tokio::test]
    async fn upstream_outage_is_service_unavailable() {
        let router = router_with_generator(FakeGenerator::failing(
            edu_llm_client::Error::ServiceUnavailable {
                status: Some(500),
                message: "upstream returned 500".into(),
            },
        ));
        let (status, body) = post_json(
            router,
            "/api/generate",
            json!({ "subject": "Music", "gradeLevel": "2nd Grade", "topicArea": "rhythm" }),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "generation_unavailable");
    }

    #[tokio::test]
    async fn analyze_returns_intent() {
        let router = router_with_generator(FakeGenerator::returning(quiz(1)));
        let (status, body) = post_json(
            router,
            "/api/analyze",
            json!({ "transcript": "Create a math worksheet for 3rd grade about dinosaurs" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "worksheet");
        assert_eq!(body["resourceType"], "worksheet");
        assert_eq!(body["slots"]["grade"], "3rd Grade");
        assert_eq!(body["slots"]["subject"], "Math");
    }

    #[tokio::test]
    async fn voice_generation_uses_transcript_slots() {
        let fake = FakeGenerator::returning(quiz(3));
        let last_user = fake.last_user.clone();
        let router = router_with_generator(fake);

        let (status, body) = post_json(
            router,
            "/api/generate/voice",
            json!({ "transcript": "Make a quiz on fractions for 5th grade with 3 questions" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["resourceType"], "quiz");
        assert_eq!(body["questions"].as_array().unwrap().len(), 3);
        assert!(last_user.lock().unwrap().contains("5th Grade math quiz"));
    }

    #[tokio::test]
    async fn voice_generation_without_grade_is_rejected() {
        let fake = FakeGenerator::returning(quiz(1));
        let calls = fake.calls.clone();
        let router = router_with_generator(fake);

        let (status, body) = post_json(
            router,
            "/api/generate/voice",
            json!({ "transcript": "Make a quiz about fractions" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("gradeLevel"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn voice_overrides_fill_gaps() {
        let router = router_with_generator(FakeGenerator::returning(quiz(1)));
        let (status, _) = post_json(
            router,
            "/api/generate/voice",
            json!({
                "transcript": "Make a quiz about fractions",
                "overrides": { "grade": "4th Grade" }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }
}
