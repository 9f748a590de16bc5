use edu_lesson_types::{Difficulty, Format, ResourceType, SlotRecord, Subject};

use crate::registry::{SchemaId, resolve};

fn base(id: SchemaId) -> &'static str {
    match id {
        SchemaId::WorksheetMathStandard => {
            "Write computation problems that build from simpler to harder. Every problem needs a single correct answer and a short worked explanation."
        }
        SchemaId::WorksheetMathWordProblems => {
            "Every problem is a short story problem with a realistic context students recognize. State the numbers clearly and include units in the answer."
        }
        SchemaId::WorksheetMathMixed => {
            "Alternate between straight computation problems and word problems, and label each with its type."
        }
        SchemaId::WorksheetReadingComprehension => {
            "Write an original passage first, then questions that can only be answered from the passage. Mix literal recall with inference."
        }
        SchemaId::WorksheetReadingVocabulary => {
            "Choose words students will meet in grade-level texts. Definitions must be student-friendly and example sentences must show the meaning in context."
        }
        SchemaId::WorksheetScience => {
            "Fill science_context with the key concepts and vocabulary the problems rely on. Questions should ask students to explain, not just recall."
        }
        SchemaId::WorksheetScienceExperiment => {
            "Design a hands-on experiment using classroom-safe materials. Fill science_context, list procedure steps in order, and ask observation questions."
        }
        SchemaId::WorksheetGeneral => {
            "Write clear, self-contained prompts with a model answer for each."
        }
        SchemaId::Quiz => {
            "Every question has exactly one correct answer. Multiple choice questions have four options with plausible distractors."
        }
        SchemaId::Rubric => {
            "Each criterion describes observable evidence at every performance level. Criterion weights must add up to total_points."
        }
        SchemaId::LessonPlan => {
            "Structure activities as an opening, a main activity, and a closing. Durations must add up to the total lesson length."
        }
        SchemaId::LessonPlanOutline => {
            "Keep the plan to a brief outline: a flat list of activities with one or two sentences each."
        }
        SchemaId::ExitSlipReflection => {
            "Ask open reflection prompts about today's learning, each with a sentence starter."
        }
        SchemaId::ExitSlipVocabulary => {
            "Ask students to define or use key terms from today's lesson in their own words."
        }
        SchemaId::ExitSlipSkill => {
            "Ask quick problems that show whether each student can apply today's skill independently."
        }
    }
}

fn difficulty(level: Difficulty) -> &'static str {
    match level {
        Difficulty::Easy => "Keep the difficulty easy: single-step items with familiar numbers and vocabulary.",
        Difficulty::Medium => "Keep the difficulty at grade level.",
        Difficulty::Hard => "Make the items challenging: multi-step reasoning and less familiar contexts.",
    }
}

/// Resource-specific guidance inserted between the count directive and the schema.
pub fn get_instructions(
    resource_type: ResourceType,
    subject: Option<Subject>,
    format: Option<Format>,
    slots: &SlotRecord,
) -> String {
    let mut lines = vec![base(resolve(resource_type, subject, format)).to_string()];

    if let Some(level) = slots.difficulty {
        lines.push(difficulty(level).to_string());
    }

    if resource_type == ResourceType::Quiz && !slots.question_types.is_empty() {
        let labels: Vec<&str> = slots.question_types.iter().map(|t| t.label()).collect();
        lines.push(format!(
            "Use only these question types: {}.",
            labels.join(", ")
        ));
    }

    if let Some(grade) = slots.grade {
        if grade.level() <= 2 {
            lines.push(format!(
                "Students are in {grade}: use short sentences and words they can decode."
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_lesson_types::{Grade, QuestionType};

    #[test]
    fn quiz_lists_requested_question_types() {
        let slots = SlotRecord {
            question_types: vec![QuestionType::MultipleChoice, QuestionType::TrueFalse],
            ..Default::default()
        };

        let text = get_instructions(ResourceType::Quiz, None, None, &slots);
        assert!(text.contains("multiple choice, true/false"), "{text}");
    }

    #[test]
    fn question_types_ignored_outside_quizzes() {
        let slots = SlotRecord {
            question_types: vec![QuestionType::ShortAnswer],
            ..Default::default()
        };

        let text = get_instructions(ResourceType::Worksheet, Some(Subject::Math), None, &slots);
        assert!(!text.contains("question types"));
    }

    #[test]
    fn science_mentions_context_block() {
        let text = get_instructions(
            ResourceType::Worksheet,
            Some(Subject::Science),
            None,
            &SlotRecord::default(),
        );
        assert!(text.contains("science_context"));
    }

    #[test]
    fn early_grades_get_reading_level_note() {
        let slots = SlotRecord {
            grade: Grade::new(1),
            difficulty: Some(Difficulty::Easy),
            ..Default::default()
        };

        let text = get_instructions(ResourceType::ExitSlip, None, None, &slots);
        assert!(text.contains("1st Grade"));
        assert!(text.contains("easy"));
    }
}
