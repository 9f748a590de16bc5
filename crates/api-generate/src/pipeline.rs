use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use edu_intent::Intent;
use edu_lesson_types::{GeneratedResource, GenerationRequest, ResourceType, SlotRecord, ValidationError};
use edu_llm_client::GenerationClient;
use edu_transcript::SpeechSource;
use serde_json::{Map, Value};

use crate::error::{GenerateError, Result};

pub type GeneratorFuture<'a> = Pin<
    Box<dyn Future<Output = std::result::Result<Map<String, Value>, edu_llm_client::Error>> + Send + 'a>,
>;

/// Anything that turns a system/user prompt pair into a JSON object.
pub trait Generator: Send + Sync {
    fn generate<'a>(&'a self, system: &'a str, user: &'a str) -> GeneratorFuture<'a>;
}

impl Generator for GenerationClient {
    fn generate<'a>(&'a self, system: &'a str, user: &'a str) -> GeneratorFuture<'a> {
        Box::pin(GenerationClient::generate(self, system, user))
    }
}

#[derive(Clone)]
pub struct Pipeline {
    generator: Arc<dyn Generator>,
}

impl Pipeline {
    pub fn new(generator: impl Generator + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Validate, prompt, generate, reconcile. Validation errors return before
    /// the generator is called.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedResource> {
        let validated = request.validate()?;
        let resource_type = validated.resource_type;
        let slots = validated.slots;

        let prompt = edu_template_lesson::assemble_prompt(&slots, resource_type, slots.format)?;

        tracing::info!(
            resource_type = %resource_type,
            subject = ?slots.subject,
            question_count = ?slots.question_count,
            "generation_started"
        );

        let raw = Value::Object(self.generator.generate(&prompt.system, &prompt.user).await?);

        let mut resource = edu_reconcile::reconcile(raw.clone(), slots.question_count, resource_type);
        resource.format = slots.format.or(resource.format);

        let schema = edu_template_lesson::get_schema(resource_type, slots.subject, slots.format);
        let missing = edu_reconcile::missing_required(&resource, schema.required_fields());
        if !missing.is_empty() {
            tracing::warn!(schema = %schema.id, missing = ?missing, "generation_missing_fields");
            return Err(GenerateError::MissingFields {
                fields: missing.into_iter().map(str::to_string).collect(),
                raw: raw.to_string(),
            });
        }

        tracing::info!(
            resource_type = %resource_type,
            items = resource.items().map(Vec::len),
            "generation_finished"
        );

        Ok(resource)
    }

    /// Folds a speech stream into a transcript and analyzes it.
    pub async fn listen(source: impl SpeechSource) -> Intent {
        let transcript = edu_transcript::collect_transcript(source).await;
        edu_intent::analyze(&transcript)
    }

    /// Builds a generation request from what a transcript mentioned.
    ///
    /// `overrides` win over the transcript; subject, grade, and topic must be
    /// known from one or the other.
    pub fn request_from_intent(
        intent: &Intent,
        overrides: &SlotRecord,
        resource_type: Option<ResourceType>,
    ) -> Result<GenerationRequest> {
        let mut slots = overrides.clone();
        slots.merge_missing(intent.slots.clone());

        if slots.subject.is_none() {
            return Err(ValidationError::new("subject", "was not mentioned in the transcript").into());
        }
        if slots.grade.is_none() {
            return Err(ValidationError::new("gradeLevel", "was not mentioned in the transcript").into());
        }
        if slots.topic_area.is_none() {
            return Err(ValidationError::new("topicArea", "was not mentioned in the transcript").into());
        }

        Ok(GenerationRequest::from_slots(
            resource_type.unwrap_or(intent.resource_type),
            &slots,
        ))
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use edu_lesson_types::{Grade, Subject};
    use edu_transcript::TranscriptEvent;
    use serde_json::json;

    use super::testing::FakeGenerator;
    use super::*;

    fn fractions_request(count: i64) -> GenerationRequest {
        GenerationRequest {
            subject: Some("Math".into()),
            grade_level: Some("3rd Grade".into()),
            topic_area: Some("fractions".into()),
            question_count: Some(count),
            ..Default::default()
        }
    }

    fn worksheet(n: usize) -> Value {
        let problems: Vec<Value> = (1..=n)
            .map(|i| json!({ "question": format!("q{i}"), "answer": "a" }))
            .collect();
        json!({ "title": "Fractions", "problems": problems })
    }

    #[tokio::test]
    async fn generate_reconciles_item_count() {
        let fake = FakeGenerator::returning(worksheet(3));
        let calls = fake.calls.clone();
        let last_user = fake.last_user.clone();
        let pipeline = Pipeline::new(fake);

        let resource = pipeline.generate(&fractions_request(5)).await.unwrap();

        assert_eq!(resource.resource_type, ResourceType::Worksheet);
        assert_eq!(resource.items().unwrap().len(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(last_user.lock().unwrap().contains("exactly 5 problems"));
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_generator() {
        let fake = FakeGenerator::returning(worksheet(1));
        let calls = fake.calls.clone();
        let pipeline = Pipeline::new(fake);

        let request = GenerationRequest {
            subject: None,
            ..fractions_request(5)
        };
        let err = pipeline.generate(&request).await.unwrap_err();

        assert!(matches!(err, GenerateError::InvalidRequest(ref e) if e.field == "subject"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_title_is_reported() {
        let pipeline = Pipeline::new(FakeGenerator::returning(json!({ "problems": [] })));
        let err = pipeline.generate(&fractions_request(0)).await.unwrap_err();

        match err {
            GenerateError::MissingFields { fields, raw } => {
                assert_eq!(fields, vec!["title".to_string()]);
                assert_eq!(raw, r#"{"problems":[]}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_errors_pass_through() {
        let pipeline = Pipeline::new(FakeGenerator::failing(edu_llm_client::Error::MalformedOutput {
            raw: "not json".into(),
        }));
        let err = pipeline.generate(&fractions_request(3)).await.unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Generation(edu_llm_client::Error::MalformedOutput { .. })
        ));
    }

    #[tokio::test]
    async fn listen_folds_stream_into_intent() {
        let events = futures_util::stream::iter(vec![
            TranscriptEvent::partial("make a quiz"),
            TranscriptEvent::final_text("Make a quiz on fractions"),
            TranscriptEvent::final_text("for 5th grade"),
        ]);

        let intent = Pipeline::listen(events).await;

        assert_eq!(intent.resource_type, ResourceType::Quiz);
        assert_eq!(intent.slots.grade, Grade::new(5));
        assert_eq!(intent.slots.subject, Some(Subject::Math));
    }

    #[test]
    fn request_from_intent_prefers_overrides() {
        let intent = edu_intent::analyze("Make a quiz on fractions for 5th grade");
        let overrides = SlotRecord {
            grade: Grade::new(4),
            ..Default::default()
        };

        let request = Pipeline::request_from_intent(&intent, &overrides, None).unwrap();

        assert_eq!(request.grade_level.as_deref(), Some("4th Grade"));
        assert_eq!(request.subject.as_deref(), Some("Math"));
        assert_eq!(request.resource_type, ResourceType::Quiz);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_from_intent_requires_grade() {
        let intent = edu_intent::analyze("Make a math quiz about fractions");
        let err = Pipeline::request_from_intent(&intent, &SlotRecord::default(), None).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidRequest(ref e) if e.field == "gradeLevel"));
    }
}
