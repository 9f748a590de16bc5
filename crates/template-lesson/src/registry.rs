//! The template registry: which response shape each
//! `(resource type, subject, format)` combination uses.
//!
//! Resolution is a single exhaustive `match`, so adding a resource type or
//! schema without wiring it up is a compile error rather than a runtime miss.

use std::sync::LazyLock;

use edu_lesson_types::{Format, ResourceType, Subject};
use strum::VariantArray;

use crate::schema::{
    Field, ResponseSchema, boolean, number, object, object_list, one_of, text, text_list,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum SchemaId {
    WorksheetMathStandard,
    WorksheetMathWordProblems,
    WorksheetMathMixed,
    WorksheetReadingComprehension,
    WorksheetReadingVocabulary,
    WorksheetScience,
    WorksheetScienceExperiment,
    WorksheetGeneral,
    Quiz,
    Rubric,
    LessonPlan,
    LessonPlanOutline,
    ExitSlipReflection,
    ExitSlipVocabulary,
    ExitSlipSkill,
}

/// Picks the schema for a request. Combinations without a dedicated entry
/// fall back to the resource type's default (math worksheets default to
/// the standard format).
pub fn resolve(
    resource_type: ResourceType,
    subject: Option<Subject>,
    format: Option<Format>,
) -> SchemaId {
    use Format as F;
    use ResourceType as R;
    use Subject as S;

    match (resource_type, subject, format) {
        (R::Worksheet, Some(S::Math), Some(F::WordProblems)) => SchemaId::WorksheetMathWordProblems,
        (R::Worksheet, Some(S::Math), Some(F::Mixed)) => SchemaId::WorksheetMathMixed,
        (R::Worksheet, Some(S::Math), _) => SchemaId::WorksheetMathStandard,
        (R::Worksheet, Some(S::Reading), Some(F::Vocabulary | F::VocabularyCheck)) => {
            SchemaId::WorksheetReadingVocabulary
        }
        (R::Worksheet, Some(S::Reading), _) => SchemaId::WorksheetReadingComprehension,
        (R::Worksheet, Some(S::Science), Some(F::Experiment)) => {
            SchemaId::WorksheetScienceExperiment
        }
        (R::Worksheet, Some(S::Science), _) => SchemaId::WorksheetScience,
        (R::Worksheet, _, _) => SchemaId::WorksheetGeneral,
        (R::Quiz, _, _) => SchemaId::Quiz,
        (R::Rubric, _, _) => SchemaId::Rubric,
        (R::LessonPlan, _, Some(F::Outline)) => SchemaId::LessonPlanOutline,
        (R::LessonPlan, _, _) => SchemaId::LessonPlan,
        (R::ExitSlip, _, Some(F::ReflectionPrompt)) => SchemaId::ExitSlipReflection,
        (R::ExitSlip, _, Some(F::VocabularyCheck | F::Vocabulary)) => SchemaId::ExitSlipVocabulary,
        (R::ExitSlip, _, _) => SchemaId::ExitSlipSkill,
    }
}

static SCHEMAS: LazyLock<Vec<ResponseSchema>> =
    LazyLock::new(|| SchemaId::VARIANTS.iter().map(|id| build(*id)).collect());

pub fn schema(id: SchemaId) -> &'static ResponseSchema {
    &SCHEMAS[id as usize]
}

pub fn get_schema(
    resource_type: ResourceType,
    subject: Option<Subject>,
    format: Option<Format>,
) -> &'static ResponseSchema {
    schema(resolve(resource_type, subject, format))
}

fn header(kind: &'static str) -> Vec<Field> {
    vec![
        text("title", kind).required(),
        text("subject", "subject name"),
        text("grade_level", "grade level, e.g. 3rd Grade"),
        text("topic", "topic covered"),
    ]
}

fn with(mut fields: Vec<Field>, rest: Vec<Field>) -> Vec<Field> {
    fields.extend(rest);
    fields
}

fn science_context() -> Field {
    object(
        "science_context",
        vec![
            text_list("key_concepts", "a scientific concept the problems rely on"),
            object_list(
                "vocabulary",
                vec![
                    text("term", "science vocabulary word"),
                    text("definition", "student-friendly definition"),
                ],
            ),
        ],
    )
}

fn build(id: SchemaId) -> ResponseSchema {
    use SchemaId as Id;

    let (resource_type, fields) = match id {
        Id::WorksheetMathStandard => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    object_list(
                        "problems",
                        vec![
                            text("question", "the computation problem, e.g. 3/4 + 1/8 = ?"),
                            text("answer", "the correct answer"),
                            text("explanation", "brief worked solution"),
                            boolean("show_work", "whether students need space to show work"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::WorksheetMathWordProblems => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    object_list(
                        "problems",
                        vec![
                            text("question", "a short story problem with a realistic context"),
                            text("operation", "the operation or skill the problem practices"),
                            text("answer", "the correct answer with units"),
                            text("explanation", "step-by-step solution"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::WorksheetMathMixed => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    object_list(
                        "problems",
                        vec![
                            one_of("type", &["computation", "word_problem"]),
                            text("question", "the problem text"),
                            text("answer", "the correct answer"),
                            text("explanation", "brief worked solution"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::WorksheetReadingComprehension => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    object(
                        "passage",
                        vec![
                            text("title", "passage title"),
                            text("text", "an original, grade-appropriate passage"),
                        ],
                    ),
                    object_list(
                        "problems",
                        vec![
                            one_of("type", &["multiple_choice", "short_answer", "true_false"]),
                            text("question", "question answerable from the passage"),
                            text_list("options", "answer choice (multiple choice only)"),
                            text("answer", "the correct answer"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::WorksheetReadingVocabulary => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    object_list(
                        "problems",
                        vec![
                            text("word", "vocabulary word"),
                            text("definition", "student-friendly definition"),
                            text("example_sentence", "sentence using the word in context"),
                            text("question", "a question that checks understanding of the word"),
                            text("answer", "the correct answer"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::WorksheetScience => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    science_context(),
                    object_list(
                        "problems",
                        vec![
                            text("question", "the science question"),
                            text("answer", "the correct answer"),
                            text("explanation", "why the answer is correct"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::WorksheetScienceExperiment => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    science_context(),
                    object(
                        "experiment",
                        vec![
                            text("hypothesis_prompt", "question students predict an answer to"),
                            text_list("materials", "classroom-safe material"),
                            text_list("procedure", "one numbered step"),
                            text_list("safety_notes", "safety reminder"),
                        ],
                    ),
                    object_list(
                        "problems",
                        vec![
                            text("question", "observation or analysis question"),
                            text("answer", "the expected answer"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::WorksheetGeneral => (
            ResourceType::Worksheet,
            with(
                header("worksheet title"),
                vec![
                    text("instructions", "directions printed at the top of the worksheet"),
                    object_list(
                        "problems",
                        vec![
                            text("question", "the problem or prompt"),
                            text("answer", "the correct or model answer"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::Quiz => (
            ResourceType::Quiz,
            with(
                header("quiz title"),
                vec![
                    text("instructions", "directions for students"),
                    object_list(
                        "questions",
                        vec![
                            one_of(
                                "type",
                                &["multiple_choice", "true_false", "short_answer", "fill_in_the_blank"],
                            ),
                            text("question", "the question text"),
                            text_list("options", "answer choice (multiple choice only)"),
                            text("correct_answer", "the correct answer"),
                            text("explanation", "why the answer is correct"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::Rubric => (
            ResourceType::Rubric,
            with(
                header("rubric title"),
                vec![
                    text("assignment_description", "what students are being assessed on"),
                    text_list("performance_levels", "level name, highest first"),
                    object_list(
                        "criteria",
                        vec![
                            text("name", "criterion name"),
                            text("description", "what the criterion measures"),
                            number("weight", "points this criterion is worth"),
                            object_list(
                                "levels",
                                vec![
                                    text("level", "performance level name"),
                                    number("points", "points awarded at this level"),
                                    text("description", "observable description of the work"),
                                ],
                            ),
                        ],
                    )
                    .required(),
                    number("total_points", "sum of all criterion weights"),
                ],
            ),
        ),
        Id::LessonPlan => {
            let phase = |description| {
                vec![
                    text("duration", "minutes, e.g. 10 minutes"),
                    text("description", description),
                ]
            };
            (
                ResourceType::LessonPlan,
                with(
                    header("lesson title"),
                    vec![
                        text("duration", "total lesson length"),
                        text_list("objectives", "measurable learning objective"),
                        text_list("materials", "material needed"),
                        text_list("standards", "related learning standard"),
                        object(
                            "activities",
                            vec![
                                object("opening", phase("hook or warm-up activity")),
                                object(
                                    "main",
                                    with(
                                        phase("core instruction and guided practice"),
                                        vec![text_list("steps", "one step of the main activity")],
                                    ),
                                ),
                                object("closing", phase("wrap-up and check for understanding")),
                            ],
                        )
                        .required(),
                        text("assessment", "how learning is checked"),
                        text("differentiation", "supports and extensions"),
                    ],
                ),
            )
        }
        Id::LessonPlanOutline => (
            ResourceType::LessonPlan,
            with(
                header("lesson title"),
                vec![
                    text("duration", "total lesson length"),
                    text_list("objectives", "measurable learning objective"),
                    object_list(
                        "activities",
                        vec![
                            text("name", "activity name"),
                            text("duration", "minutes"),
                            text("description", "one or two sentences"),
                        ],
                    )
                    .required(),
                    text("assessment", "how learning is checked"),
                ],
            ),
        ),
        Id::ExitSlipReflection => (
            ResourceType::ExitSlip,
            with(
                header("exit slip title"),
                vec![
                    one_of("format", &["reflection_prompt"]),
                    object_list(
                        "questions",
                        vec![
                            text("question", "reflection prompt about today's learning"),
                            text("sentence_starter", "sentence starter to scaffold the answer"),
                            number("response_lines", "lines left for the answer"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::ExitSlipVocabulary => (
            ResourceType::ExitSlip,
            with(
                header("exit slip title"),
                vec![
                    one_of("format", &["vocabulary_check"]),
                    object_list(
                        "questions",
                        vec![
                            text("question", "prompt asking students to define or use the term"),
                            text("term", "vocabulary term"),
                            text("expected_definition", "definition a correct answer contains"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
        Id::ExitSlipSkill => (
            ResourceType::ExitSlip,
            with(
                header("exit slip title"),
                vec![
                    one_of("format", &["skill_assessment"]),
                    object_list(
                        "questions",
                        vec![
                            text("question", "a quick problem that checks the skill"),
                            text("correct_answer", "the correct answer"),
                            text("skill", "the skill being checked"),
                        ],
                    )
                    .required(),
                ],
            ),
        ),
    };

    ResponseSchema {
        id,
        resource_type,
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_id() {
        for id in SchemaId::VARIANTS {
            assert_eq!(schema(*id).id, *id);
        }
    }

    #[test]
    fn every_reachable_key_resolves_to_its_resource_type() {
        let subjects = std::iter::once(None).chain(Subject::VARIANTS.iter().copied().map(Some));
        for subject in subjects {
            let formats = std::iter::once(None).chain(Format::VARIANTS.iter().copied().map(Some));
            for format in formats {
                for resource_type in ResourceType::VARIANTS {
                    let schema = get_schema(*resource_type, subject, format);
                    assert_eq!(schema.resource_type, *resource_type);
                }
            }
        }
    }

    #[test]
    fn every_schema_renders_valid_json_with_required_fields() {
        for id in SchemaId::VARIANTS {
            let schema = schema(*id);
            let value: serde_json::Value = serde_json::from_str(&schema.render())
                .unwrap_or_else(|e| panic!("{id}: {e}"));

            assert!(value.get(schema.item_key()).is_some(), "{id}");
            for name in schema.required_fields() {
                assert!(value.get(name).is_some(), "{id}: {name}");
            }
            assert!(
                schema.required_fields().any(|f| f == schema.item_key()),
                "{id} must require its item list"
            );
        }
    }

    #[test]
    fn math_defaults_to_standard() {
        assert_eq!(
            resolve(ResourceType::Worksheet, Some(Subject::Math), None),
            SchemaId::WorksheetMathStandard
        );
        assert_eq!(
            resolve(ResourceType::Worksheet, Some(Subject::Math), Some(Format::Outline)),
            SchemaId::WorksheetMathStandard
        );
    }

    #[test]
    fn exit_slip_formats_use_their_own_item_shape() {
        let shapes = [
            (Format::ReflectionPrompt, "sentence_starter"),
            (Format::VocabularyCheck, "term"),
            (Format::SkillAssessment, "skill"),
        ];
        for (format, distinctive) in shapes {
            let rendered = get_schema(ResourceType::ExitSlip, None, Some(format)).render();
            assert!(rendered.contains(distinctive), "{format}");
        }
    }

    #[test]
    fn unmatched_subjects_fall_back() {
        assert_eq!(
            resolve(ResourceType::Worksheet, Some(Subject::Music), Some(Format::Comprehension)),
            SchemaId::WorksheetGeneral
        );
        assert_eq!(
            resolve(ResourceType::Worksheet, None, None),
            SchemaId::WorksheetGeneral
        );
    }
}
