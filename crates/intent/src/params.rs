//! Resource-specific parameters: how many items, which layout, how hard,
//! which question kinds, what topic, and any extra instructions.

use std::sync::LazyLock;

use edu_lesson_types::{Difficulty, Format, QuestionType};
use regex::{Captures, Regex};

use crate::rules::{Rule, all_matches, cardinal_alternation, compile, first_match, number_at};

pub(crate) const MAX_COUNT: u32 = 50;

// Words allowed between a number and "questions" ("8 multiple choice questions").
const QUALIFIERS: &str = r"multiple[\s-]choice|true[\s/-]*(?:or\s+)?false|short[\s-]answer|fill[\s-]in[\s-]the[\s-]blank|open[\s-]ended|word|story|practice|review|easy|hard|challenging";

fn bounded_count(caps: &Captures<'_>) -> Option<u32> {
    number_at(caps, 1).filter(|n| *n <= MAX_COUNT)
}

static COUNT_RULES: LazyLock<Vec<Rule<u32>>> = LazyLock::new(|| {
    vec![
        Rule::derived(r"\b(\d+)\s+questions?\b", bounded_count),
        Rule::derived(
            &format!(r"\b(\d+)\s+(?:(?:{QUALIFIERS})\s+){{1,2}}(?:questions?|problems?)\b"),
            bounded_count,
        ),
        Rule::derived(
            r"\b(\d+)\s+(?:problems?|items?|prompts?|criteria|exercises?)\b",
            bounded_count,
        ),
        Rule::derived(
            &format!(
                r"\b({})\s+(?:questions?|problems?|items?|prompts?|criteria|exercises?)\b",
                cardinal_alternation()
            ),
            bounded_count,
        ),
        Rule::fixed(r"\bno\s+(?:questions|problems)\b", 0),
        Rule::fixed(r"\bcontent[\s-]only\b", 0),
    ]
});

static FORMAT_RULES: LazyLock<Vec<Rule<Format>>> = LazyLock::new(|| {
    vec![
        Rule::fixed(r"\breflect(?:ion|ive)?\b", Format::ReflectionPrompt),
        Rule::fixed(r"\bvocab(?:ulary)?\s+(?:check|review)\b", Format::VocabularyCheck),
        Rule::fixed(
            r"\b(?:skills?\s+(?:check|assessment)|check for understanding)\b",
            Format::SkillAssessment,
        ),
        Rule::fixed(r"\b(?:word|story)\s+problems?\b", Format::WordProblems),
        Rule::fixed(r"\bmixed(?:\s+(?:practice|review|format))?\b", Format::Mixed),
        Rule::fixed(r"\b(?:comprehension|reading passage|passage)\b", Format::Comprehension),
        Rule::fixed(r"\bvocab(?:ulary)?\b", Format::Vocabulary),
        Rule::fixed(r"\b(?:experiments?|lab|hands[\s-]on)\b", Format::Experiment),
        Rule::fixed(r"\b(?:outline|brief|quick plan)\b", Format::Outline),
        Rule::fixed(r"\b(?:standard|computation|basic facts|drill)\b", Format::Standard),
    ]
});

static DIFFICULTY_RULES: LazyLock<Vec<Rule<Difficulty>>> = LazyLock::new(|| {
    vec![
        Rule::fixed(r"\b(?:easy|simple|beginner|beginning)\b", Difficulty::Easy),
        Rule::fixed(r"\b(?:medium|moderate|intermediate|on[\s-]level)\b", Difficulty::Medium),
        Rule::fixed(r"\b(?:hard|difficult|challenging|advanced)\b", Difficulty::Hard),
    ]
});

static QUESTION_TYPE_RULES: LazyLock<Vec<Rule<QuestionType>>> = LazyLock::new(|| {
    vec![
        Rule::fixed(r"\bmultiple[\s-]choice\b", QuestionType::MultipleChoice),
        Rule::fixed(
            r"\btrue[\s/-]*(?:or|and)?[\s/-]*false\b",
            QuestionType::TrueFalse,
        ),
        Rule::fixed(r"\b(?:short[\s-]answers?|open[\s-]ended)\b", QuestionType::ShortAnswer),
        Rule::fixed(
            r"\b(?:fill[\s-]in[\s-]the[\s-]blanks?|fill[\s-]ins?|cloze)\b",
            QuestionType::FillInTheBlank,
        ),
    ]
});

// A topic starts after "about"/"on" and runs to the next clause marker. "and"
// only ends it when a count or a request follows ("addition and subtraction"
// stays whole).
static TOPIC_START: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:about|on|covering|focused on)\s+(?:the topic of\s+)?"));

static TOPIC_END: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"\s+(?:for|with|in|using|that|to|at|about|on)\b|\s+and\s+(?:\d|(?:one|two|three|four|five|six|seven|eight|nine|ten|twelve|fifteen|twenty|make|include|add|give|use|keep|have|it)\b)|[.,;:!?]",
    )
});

static LEADING_ARTICLE: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:the|a|an|some)\s+"));

static INSTRUCTIONS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:please\s+)?(?:make sure|be sure|remember)\s+(?:to\s+|that\s+)?(.+?)(?:[.!?]|$)")
});

const MAX_TOPIC_CHARS: usize = 80;

pub(crate) fn question_count(text: &str) -> Option<u32> {
    first_match(&COUNT_RULES, text)
}

pub(crate) fn format(text: &str) -> Option<Format> {
    first_match(&FORMAT_RULES, text)
}

pub(crate) fn difficulty(text: &str) -> Option<Difficulty> {
    first_match(&DIFFICULTY_RULES, text)
}

pub(crate) fn question_types(text: &str) -> Vec<QuestionType> {
    let mut types = all_matches(&QUESTION_TYPE_RULES, text);
    types.sort();
    types
}

pub(crate) fn topic(text: &str) -> Option<String> {
    TOPIC_START.find_iter(text).find_map(|start| {
        let rest = &text[start.end()..];
        let end = TOPIC_END.find(rest).map_or(rest.len(), |m| m.start());
        let topic = LEADING_ARTICLE.replace(rest[..end].trim(), "");
        let topic = truncate_words(topic.trim(), MAX_TOPIC_CHARS);
        (!topic.is_empty() && !is_count_phrase(&topic)).then_some(topic)
    })
}

fn is_count_phrase(topic: &str) -> bool {
    question_count(topic).is_some() && topic.split_whitespace().count() <= 2
}

fn truncate_words(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for word in text.split_whitespace() {
        if out.len() + word.len() + 1 > max {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

pub(crate) fn custom_instructions(text: &str) -> Option<String> {
    let caps = INSTRUCTIONS.captures(text)?;
    let instruction = caps.get(1)?.as_str().trim();
    (!instruction.is_empty()).then(|| instruction.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(question_count("give me 10 questions"), Some(10));
        assert_eq!(question_count("1 question only"), Some(1));
        assert_eq!(question_count("twelve problems"), Some(12));
        assert_eq!(question_count("with 8 items"), Some(8));
        assert_eq!(question_count("content only reading passage"), Some(0));
        assert_eq!(question_count("500 questions"), None);
        assert_eq!(question_count("a few questions"), None);
    }

    #[test]
    fn counts_with_qualifiers() {
        assert_eq!(question_count("8 multiple choice questions"), Some(8));
        assert_eq!(question_count("5 true or false questions"), Some(5));
        assert_eq!(question_count("12 word problems"), Some(12));
        assert_eq!(question_count("grade 3 math questions"), None);
    }

    #[test]
    fn numeric_question_rule_comes_first() {
        assert_eq!(question_count("4 problems and 6 questions"), Some(6));
    }

    #[test]
    fn formats() {
        assert_eq!(format("an exit slip with a vocabulary check"), Some(Format::VocabularyCheck));
        assert_eq!(format("vocabulary worksheet"), Some(Format::Vocabulary));
        assert_eq!(format("10 word problems"), Some(Format::WordProblems));
        assert_eq!(format("a reflection exit ticket"), Some(Format::ReflectionPrompt));
        assert_eq!(format("a plain worksheet"), None);
    }

    #[test]
    fn question_types_are_collected_in_canonical_order() {
        assert_eq!(
            question_types("some true or false and multiple-choice questions"),
            vec![QuestionType::MultipleChoice, QuestionType::TrueFalse]
        );
        assert_eq!(
            question_types("fill in the blank"),
            vec![QuestionType::FillInTheBlank]
        );
        assert!(question_types("a quiz").is_empty());
    }

    #[test]
    fn topics() {
        assert_eq!(topic("a quiz on fractions for 5th grade").as_deref(), Some("fractions"));
        assert_eq!(
            topic("worksheet for 3rd grade about the water cycle").as_deref(),
            Some("water cycle")
        );
        assert_eq!(
            topic("a lesson plan about Ancient Egypt, please").as_deref(),
            Some("Ancient Egypt")
        );
        assert_eq!(topic("make me a worksheet"), None);
    }

    #[test]
    fn topic_keeps_compound_subjects() {
        assert_eq!(
            topic("a worksheet about addition and subtraction for 2nd grade").as_deref(),
            Some("addition and subtraction")
        );
        assert_eq!(
            topic("a quiz on rocks and minerals and make it 10 questions").as_deref(),
            Some("rocks and minerals")
        );
        assert_eq!(
            topic("a quiz on fractions and 5 word problems").as_deref(),
            Some("fractions")
        );
    }

    #[test]
    fn topic_skips_count_phrases() {
        assert_eq!(
            topic("a quiz on 10 questions about plants").as_deref(),
            Some("plants")
        );
    }

    #[test]
    fn instructions() {
        assert_eq!(
            custom_instructions("Make a quiz. Please make sure to include an answer key.")
                .as_deref(),
            Some("include an answer key")
        );
        assert_eq!(custom_instructions("make a quiz"), None);
    }

    #[test]
    fn difficulty_levels() {
        assert_eq!(difficulty("a challenging quiz"), Some(Difficulty::Hard));
        assert_eq!(difficulty("keep it simple"), Some(Difficulty::Easy));
        assert_eq!(difficulty("a quiz"), None);
    }
}
