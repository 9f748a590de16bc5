use serde::{Deserialize, Serialize};

/// What the teacher asked for, as the UI distinguishes it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceCategory {
    #[default]
    Worksheet,
    Quiz,
    BellRinger,
    ChoiceBoard,
    LessonPlan,
    Rubric,
    SubPlan,
    ExitTicket,
}

impl ResourceCategory {
    /// Collapses the UI category onto the narrower set the generator knows about.
    pub fn resource_type(self) -> ResourceType {
        match self {
            Self::Worksheet | Self::ChoiceBoard => ResourceType::Worksheet,
            Self::Quiz => ResourceType::Quiz,
            Self::Rubric => ResourceType::Rubric,
            Self::LessonPlan | Self::SubPlan => ResourceType::LessonPlan,
            Self::ExitTicket | Self::BellRinger => ResourceType::ExitSlip,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceType {
    #[default]
    Worksheet,
    Quiz,
    Rubric,
    LessonPlan,
    #[serde(alias = "exit_ticket")]
    #[strum(to_string = "exit_slip", serialize = "exit_ticket")]
    ExitSlip,
}

impl ResourceType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Worksheet => "worksheet",
            Self::Quiz => "quiz",
            Self::Rubric => "rubric",
            Self::LessonPlan => "lesson plan",
            Self::ExitSlip => "exit slip",
        }
    }

    /// Top-level field holding the resource's repeated items. Renderers key on this.
    pub fn item_key(self) -> &'static str {
        match self {
            Self::Worksheet => "problems",
            Self::Quiz | Self::ExitSlip => "questions",
            Self::Rubric => "criteria",
            Self::LessonPlan => "activities",
        }
    }

    /// Whether a requested count applies to [`Self::item_key`].
    pub fn is_counted(self) -> bool {
        !matches!(self, Self::LessonPlan)
    }

    /// Noun used in count wording ("exactly 5 problems", "exactly 1 problem").
    pub fn item_noun(self, count: u32) -> &'static str {
        match (self, count == 1) {
            (Self::Worksheet, false) => "problems",
            (Self::Worksheet, true) => "problem",
            (Self::Quiz | Self::ExitSlip, false) => "questions",
            (Self::Quiz | Self::ExitSlip, true) => "question",
            (Self::Rubric, false) => "criteria",
            (Self::Rubric, true) => "criterion",
            (Self::LessonPlan, false) => "activities",
            (Self::LessonPlan, true) => "activity",
        }
    }
}

/// Layout variant of a resource. Which formats make sense depends on the
/// resource type and subject; the template registry falls back to a default
/// schema for combinations it has no dedicated entry for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Format {
    Standard,
    WordProblems,
    Mixed,
    Comprehension,
    Vocabulary,
    Experiment,
    Outline,
    ReflectionPrompt,
    VocabularyCheck,
    SkillAssessment,
}

impl Format {
    /// Unknown format strings mean "no preference" rather than an error.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        raw.trim().replace(['-', ' '], "_").parse().ok()
    }
}

/// The canonical generated resource handed to renderers and exporters.
///
/// `content` is the model's JSON object after reconciliation. Its shape is
/// determined by `resource_type`: the field named by
/// [`ResourceType::item_key`] is the one downstream consumers iterate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResource {
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(flatten)]
    pub content: serde_json::Map<String, serde_json::Value>,
}

impl GeneratedResource {
    pub fn new(resource_type: ResourceType, format: Option<Format>) -> Self {
        Self {
            resource_type,
            format,
            content: serde_json::Map::new(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.content.get("title").and_then(|v| v.as_str())
    }

    pub fn items(&self) -> Option<&Vec<serde_json::Value>> {
        self.content
            .get(self.resource_type.item_key())
            .and_then(|v| v.as_array())
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<serde_json::Value>> {
        self.content
            .get_mut(self.resource_type.item_key())
            .and_then(|v| v.as_array_mut())
    }
}
