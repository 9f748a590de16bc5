use serde::{Deserialize, Serialize};

use crate::{Format, Grade, QuestionType, ResourceType, SlotRecord, Subject, Theme};

pub const MAX_QUESTION_COUNT: i64 = 50;

/// Body of a generation request as the web client sends it.
///
/// Fields stay loosely typed so that a bad value turns into a field-level
/// [`ValidationError`] instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub topic_area: Option<String>,
    #[serde(default)]
    pub question_count: Option<i64>,
    #[serde(default)]
    pub custom_instructions: Option<String>,
    #[serde(default)]
    pub selected_question_types: Vec<QuestionType>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub difficulty: Option<crate::Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub resource_type: ResourceType,
    pub slots: SlotRecord,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl GenerationRequest {
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let subject = non_blank(self.subject.as_deref())
            .ok_or(ValidationError::missing("subject"))?
            .parse::<Subject>()
            .map_err(|_| ValidationError::new("subject", "is not a supported subject"))?;

        let grade = non_blank(self.grade_level.as_deref())
            .ok_or(ValidationError::missing("gradeLevel"))?
            .parse::<Grade>()
            .map_err(|e| ValidationError::new("gradeLevel", e.to_string()))?;

        let topic_area = non_blank(self.topic_area.as_deref())
            .ok_or(ValidationError::missing("topicArea"))?
            .to_string();

        let question_count = match self.question_count {
            None => None,
            Some(n) if (0..=MAX_QUESTION_COUNT).contains(&n) => Some(n as u32),
            Some(_) => {
                return Err(ValidationError::new(
                    "questionCount",
                    format!("must be between 0 and {MAX_QUESTION_COUNT}"),
                ));
            }
        };

        let mut question_types = self.selected_question_types.clone();
        question_types.sort();
        question_types.dedup();

        Ok(ValidatedRequest {
            resource_type: self.resource_type,
            slots: SlotRecord {
                grade: Some(grade),
                subject: Some(subject),
                theme: non_blank(self.theme.as_deref()).and_then(|t| t.parse::<Theme>().ok()),
                topic_area: Some(topic_area),
                question_count,
                format: non_blank(self.format.as_deref()).and_then(Format::parse_lenient),
                difficulty: self.difficulty,
                question_types,
                custom_instructions: non_blank(self.custom_instructions.as_deref())
                    .map(str::to_string),
            },
        })
    }

    /// Builds a request from slots gathered elsewhere (e.g. a voice transcript).
    pub fn from_slots(resource_type: ResourceType, slots: &SlotRecord) -> Self {
        Self {
            subject: slots.subject.map(|s| s.to_string()),
            grade_level: slots.grade.map(|g| g.to_string()),
            resource_type,
            topic_area: slots.topic_area.clone(),
            question_count: slots.question_count.map(i64::from),
            custom_instructions: slots.custom_instructions.clone(),
            selected_question_types: slots.question_types.clone(),
            format: slots.format.map(|f| f.to_string()),
            theme: slots.theme.map(|t| t.to_string()),
            difficulty: slots.difficulty,
        }
    }
}
