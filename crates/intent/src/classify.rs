use std::sync::LazyLock;

use edu_lesson_types::ResourceCategory;
use regex::Regex;

use crate::rules::compile;

struct CategoryPatterns {
    category: ResourceCategory,
    patterns: Vec<Regex>,
}

fn entry(category: ResourceCategory, patterns: &[&str]) -> CategoryPatterns {
    CategoryPatterns {
        category,
        patterns: patterns.iter().map(|p| compile(p)).collect(),
    }
}

// Priority order. Specific artifacts come before the generic ones they could
// be mistaken for: "exit ticket skill assessment" is an exit ticket, not a
// quiz, and "quiz" must never fall through to the worksheet catch-all.
static CATEGORY_TABLE: LazyLock<Vec<CategoryPatterns>> = LazyLock::new(|| {
    vec![
        entry(
            ResourceCategory::Rubric,
            &[r"\brubrics?\b", r"\bgrading (?:criteria|guide)\b", r"\bscoring guide\b"],
        ),
        entry(
            ResourceCategory::SubPlan,
            &[
                r"\bsub(?:stitute)?\s+plans?\b",
                r"\bfor (?:a|the|my) sub(?:stitute)?\b",
            ],
        ),
        entry(
            ResourceCategory::LessonPlan,
            &[
                r"\blesson\s+plans?\b",
                r"\bplan (?:a|the|my) lesson\b",
                r"\bteaching plan\b",
            ],
        ),
        entry(
            ResourceCategory::ExitTicket,
            &[r"\bexit\s+(?:tickets?|slips?|cards?)\b"],
        ),
        entry(
            ResourceCategory::BellRinger,
            &[
                r"\bbell[\s-]?ringers?\b",
                r"\bwarm[\s-]?ups?\b",
                r"\bdo[\s-]now\b",
                r"\bmorning work\b",
            ],
        ),
        entry(
            ResourceCategory::ChoiceBoard,
            &[r"\bchoice\s+boards?\b", r"\b(?:activity|choice)\s+menu\b"],
        ),
        entry(
            ResourceCategory::Quiz,
            &[r"\bquiz(?:zes)?\b", r"\bexams?\b"],
        ),
        entry(
            ResourceCategory::Worksheet,
            &[
                r"\bworksheets?\b",
                r"\bpractice\s+(?:sheet|problems|page)\b",
                r"\bhandouts?\b",
                r"\bactivity sheet\b",
            ],
        ),
        // Context words only count when no artifact is named outright.
        entry(ResourceCategory::LessonPlan, &[r"\blesson (?:on|about)\b"]),
        entry(
            ResourceCategory::Quiz,
            &[r"\btests?\b", r"\bassessments?\b"],
        ),
    ]
});

/// Which resource the transcript asks for. Total: falls back to
/// [`ResourceCategory::Worksheet`] when nothing matches.
pub fn classify_resource(transcript: &str) -> ResourceCategory {
    CATEGORY_TABLE
        .iter()
        .find(|entry| entry.patterns.iter().any(|p| p.is_match(transcript)))
        .map(|entry| entry.category)
        .unwrap_or_default()
}
