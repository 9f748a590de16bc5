use askama::Template;
use edu_lesson_types::{Format, ResourceType, SlotRecord};

use crate::{Error, get_instructions, get_schema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[derive(Template)]
#[template(path = "system.md.jinja", escape = "none")]
struct SystemPrompt<'a> {
    persona: String,
    framing: String,
    theme: Option<String>,
    custom_instructions: Option<&'a str>,
    count_directive: Option<String>,
    instructions: String,
    schema: String,
}

#[derive(Template)]
#[template(path = "user.md.jinja", escape = "none")]
struct UserPrompt {
    request: String,
    count: Option<u32>,
    noun: &'static str,
}

/// Builds the system and user prompts for one generation call.
pub fn assemble_prompt(
    slots: &SlotRecord,
    resource_type: ResourceType,
    format: Option<Format>,
) -> Result<Prompt, Error> {
    let format = format.or(slots.format);
    let schema = get_schema(resource_type, slots.subject, format);

    let system = SystemPrompt {
        persona: persona(slots),
        framing: framing(slots, resource_type, format),
        theme: slots.effective_theme().map(|theme| {
            format!(
                "Give everything a {theme} theme: use {} in names, settings, and examples. The theme must not change the skill being practiced.",
                theme.motifs()
            )
        }),
        custom_instructions: slots
            .custom_instructions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        count_directive: count_directive(slots.question_count, resource_type),
        instructions: get_instructions(resource_type, slots.subject, format, slots),
        schema: schema.render(),
    }
    .render()?;

    let count = slots
        .question_count
        .filter(|n| *n > 0 && resource_type.is_counted());
    let user = UserPrompt {
        request: request_phrase(slots, resource_type),
        count,
        noun: resource_type.item_noun(count.unwrap_or_default()),
    }
    .render()?;

    Ok(Prompt { system, user })
}

fn persona(slots: &SlotRecord) -> String {
    let teacher = match slots.subject {
        Some(subject) => format!("You are an expert {} teacher", subject.prose()),
        None => "You are an expert teacher".to_string(),
    };
    match slots.grade {
        Some(grade) => format!("{teacher} creating classroom materials for {grade} students."),
        None => format!("{teacher} creating classroom materials."),
    }
}

fn framing(slots: &SlotRecord, resource_type: ResourceType, format: Option<Format>) -> String {
    let mut out = match slots.topic_area.as_deref() {
        Some(topic) => format!("Create a {} on the topic of \"{topic}\".", resource_type.label()),
        None => format!("Create a {} for this class.", resource_type.label()),
    };
    if let Some(format) = format {
        out.push_str(&format!(
            " Use the {} format.",
            format.to_string().replace('_', " ")
        ));
    }
    out
}

fn count_directive(count: Option<u32>, resource_type: ResourceType) -> Option<String> {
    if !resource_type.is_counted() {
        return None;
    }
    let key = resource_type.item_key();
    match count? {
        0 => Some(format!(
            "This is content only. Do not include any questions, problems, or assessment items, and leave the \"{key}\" array empty."
        )),
        n => Some(format!(
            "Include exactly {n} {}. The \"{key}\" array must have exactly {n} entries.",
            resource_type.item_noun(n)
        )),
    }
}

fn request_phrase(slots: &SlotRecord, resource_type: ResourceType) -> String {
    let mut words = Vec::new();
    if let Some(grade) = slots.grade {
        words.push(grade.to_string());
    }
    if let Some(subject) = slots.subject {
        words.push(subject.prose().to_string());
    }
    words.push(resource_type.label().to_string());
    if let Some(topic) = slots.topic_area.as_deref() {
        words.push(format!("about {topic}"));
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_lesson_types::{Grade, Subject, Theme};

    fn fractions() -> SlotRecord {
        SlotRecord {
            grade: Grade::new(3),
            subject: Some(Subject::Math),
            topic_area: Some("fractions".into()),
            question_count: Some(10),
            ..Default::default()
        }
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let slots = SlotRecord {
            theme: Some(Theme::Halloween),
            custom_instructions: Some("use pizza examples".into()),
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Worksheet, None).unwrap();

        let order = [
            position(&prompt.system, "You are an expert math teacher"),
            position(&prompt.system, "on the topic of \"fractions\""),
            position(&prompt.system, "halloween theme"),
            position(&prompt.system, "use pizza examples"),
            position(&prompt.system, "Include exactly 10 problems"),
            position(&prompt.system, "worked explanation"),
            position(&prompt.system, "\"problems\": ["),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{order:?}");
    }

    #[test]
    fn persona_names_subject_and_grade() {
        let prompt = assemble_prompt(&fractions(), ResourceType::Worksheet, None).unwrap();
        assert!(
            prompt
                .system
                .starts_with("You are an expert math teacher creating classroom materials for 3rd Grade students.")
        );
    }

    #[test]
    fn exact_count_is_restated_in_user_prompt() {
        let prompt = assemble_prompt(&fractions(), ResourceType::Worksheet, None).unwrap();
        assert!(prompt.user.contains("exactly 10 problems"), "{}", prompt.user);
        assert!(prompt.user.contains("3rd Grade math worksheet about fractions"));
    }

    #[test]
    fn single_item_uses_singular_noun() {
        let slots = SlotRecord {
            question_count: Some(1),
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Worksheet, None).unwrap();
        assert!(prompt.system.contains("Include exactly 1 problem."), "{}", prompt.system);
        assert!(prompt.user.contains("exactly 1 problem,"), "{}", prompt.user);

        let prompt = assemble_prompt(&slots, ResourceType::Rubric, None).unwrap();
        assert!(prompt.system.contains("Include exactly 1 criterion."), "{}", prompt.system);
    }

    #[test]
    fn zero_count_uses_content_only_wording() {
        let slots = SlotRecord {
            question_count: Some(0),
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Worksheet, None).unwrap();

        assert!(prompt.system.contains("This is content only"));
        assert!(!prompt.system.contains("Include exactly"));
        assert!(!prompt.user.contains("exactly"));
    }

    #[test]
    fn absent_count_has_no_count_wording() {
        let slots = SlotRecord {
            question_count: None,
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Quiz, None).unwrap();

        assert!(!prompt.system.contains("Include exactly"));
        assert!(!prompt.system.contains("content only"));
    }

    #[test]
    fn general_theme_is_not_injected() {
        let slots = SlotRecord {
            theme: Some(Theme::General),
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Worksheet, None).unwrap();
        assert!(!prompt.system.contains("theme"));
    }

    #[test]
    fn schema_is_embedded_verbatim() {
        let slots = SlotRecord {
            subject: Some(Subject::Science),
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Worksheet, Some(Format::Experiment)).unwrap();
        let schema = get_schema(ResourceType::Worksheet, Some(Subject::Science), Some(Format::Experiment));

        assert!(prompt.system.contains(&schema.render()));
        assert!(prompt.system.contains("Use the experiment format."));
    }

    #[test]
    fn lesson_plans_skip_count_directive() {
        let prompt = assemble_prompt(&fractions(), ResourceType::LessonPlan, None).unwrap();
        assert!(!prompt.system.contains("Include exactly"));
        assert!(!prompt.user.contains("exactly"));
    }

    #[test]
    fn blank_custom_instructions_are_dropped() {
        let slots = SlotRecord {
            custom_instructions: Some("   ".into()),
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Worksheet, None).unwrap();
        assert!(!prompt.system.contains("Additional instructions"));
    }

    #[quickcheck_macros::quickcheck]
    fn positive_counts_are_stated_exactly(count: u8) -> bool {
        let n = u32::from(count.max(2));
        let slots = SlotRecord {
            question_count: Some(n),
            ..fractions()
        };
        let prompt = assemble_prompt(&slots, ResourceType::Quiz, None).unwrap();

        prompt.system.contains(&format!("Include exactly {n} questions"))
            && prompt.user.contains(&format!("exactly {n} questions"))
    }
}
