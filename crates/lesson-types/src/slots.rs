use serde::{Deserialize, Serialize};

use crate::{Format, Grade};

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
#[strum(ascii_case_insensitive)]
pub enum Subject {
    #[serde(alias = "math")]
    #[strum(to_string = "Math", serialize = "maths", serialize = "mathematics")]
    Math,
    #[serde(alias = "reading")]
    #[strum(to_string = "Reading", serialize = "ela", serialize = "english")]
    Reading,
    #[serde(alias = "science")]
    Science,
    #[serde(alias = "history")]
    #[strum(to_string = "History", serialize = "social studies")]
    History,
    #[serde(alias = "art")]
    Art,
    #[serde(alias = "music")]
    Music,
    #[serde(rename = "PE", alias = "pe")]
    #[strum(to_string = "PE", serialize = "physical education")]
    Pe,
}

impl Subject {
    /// How the subject reads inside a sentence ("an expert science teacher").
    pub fn prose(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Reading => "reading",
            Self::Science => "science",
            Self::History => "history",
            Self::Art => "art",
            Self::Music => "music",
            Self::Pe => "physical education",
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
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    Halloween,
    Winter,
    Spring,
    Ocean,
    Space,
    Animals,
    Sports,
    General,
}

impl Theme {
    pub fn is_general(self) -> bool {
        self == Self::General
    }

    /// Motifs the model is asked to weave into problems for this theme.
    pub fn motifs(self) -> &'static str {
        match self {
            Self::Halloween => "pumpkins, costumes, friendly ghosts, and trick-or-treating",
            Self::Winter => "snow, mittens, hot cocoa, and snowmen",
            Self::Spring => "flowers, rain showers, gardens, and baby animals",
            Self::Ocean => "sea creatures, coral reefs, waves, and beaches",
            Self::Space => "planets, rockets, astronauts, and stars",
            Self::Animals => "pets, farm animals, zoo animals, and wildlife",
            Self::Sports => "teams, games, scores, and athletes",
            Self::General => "everyday classroom situations",
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
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    FillInTheBlank,
}

impl QuestionType {
    pub fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple choice",
            Self::TrueFalse => "true/false",
            Self::ShortAnswer => "short answer",
            Self::FillInTheBlank => "fill in the blank",
        }
    }
}

/// Everything the voice pipeline (or a form) knows about the requested resource.
///
/// Every field is optional: the extractor only fills what the transcript
/// mentions and never guesses a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "3rd Grade"))]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub question_types: Vec<QuestionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

impl SlotRecord {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Theme worth injecting into a prompt; `general` counts as no theme.
    pub fn effective_theme(&self) -> Option<Theme> {
        self.theme.filter(|t| !t.is_general())
    }

    /// Fills every unset field from `other`, keeping what is already set.
    pub fn merge_missing(&mut self, other: SlotRecord) {
        self.grade = self.grade.or(other.grade);
        self.subject = self.subject.or(other.subject);
        self.theme = self.theme.or(other.theme);
        self.topic_area = self.topic_area.take().or(other.topic_area);
        self.question_count = self.question_count.or(other.question_count);
        self.format = self.format.or(other.format);
        self.difficulty = self.difficulty.or(other.difficulty);
        if self.question_types.is_empty() {
            self.question_types = other.question_types;
        }
        self.custom_instructions = self.custom_instructions.take().or(other.custom_instructions);
    }
}
