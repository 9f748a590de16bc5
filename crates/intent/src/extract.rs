use edu_lesson_types::SlotRecord;

use crate::params;
use crate::rules::first_match;
use crate::tables::{GRADE_RULES, SUBJECT_RULES, THEME_RULES};

/// Extracts every slot the transcript mentions.
///
/// Slot categories are scanned independently; within a category the first
/// matching rule wins. Nothing is guessed: a slot the transcript does not
/// mention stays `None`.
pub fn extract_slots(transcript: &str) -> SlotRecord {
    if transcript.trim().is_empty() {
        return SlotRecord::default();
    }

    SlotRecord {
        grade: first_match(&GRADE_RULES, transcript),
        subject: first_match(&SUBJECT_RULES, transcript),
        theme: first_match(&THEME_RULES, transcript),
        topic_area: params::topic(transcript),
        question_count: params::question_count(transcript),
        format: params::format(transcript),
        difficulty: params::difficulty(transcript),
        question_types: params::question_types(transcript),
        custom_instructions: params::custom_instructions(transcript),
    }
}
