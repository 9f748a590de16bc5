//! Normalizes a model response into a [`GeneratedResource`].
//!
//! The model is asked for an exact item count but does not always comply;
//! reconciliation trims or pads the item list to the requested length and
//! folds alternate key spellings onto the canonical ones.

use edu_lesson_types::{Format, GeneratedResource, ResourceType};
use serde_json::{Map, Value};

/// Item fields that get the variation suffix on padded clones, in priority order.
const LABEL_FIELDS: &[&str] = &["question", "problem", "prompt", "name"];

/// Top-level alternate spellings, `(alias, canonical)`.
const TOP_LEVEL_ALIASES: &[(&str, &str)] = &[
    ("scienceContent", "science_context"),
    ("scienceContext", "science_context"),
    ("gradeLevel", "grade_level"),
    ("totalPoints", "total_points"),
    ("performanceLevels", "performance_levels"),
    ("assignmentDescription", "assignment_description"),
];

const SCIENCE_CONTEXT_ALIASES: &[(&str, &str)] = &[
    ("concepts", "key_concepts"),
    ("keyConcepts", "key_concepts"),
];

const ITEM_ALIASES: &[(&str, &str)] = &[
    ("correctAnswer", "correct_answer"),
    ("exampleSentence", "example_sentence"),
    ("sentenceStarter", "sentence_starter"),
    ("responseLines", "response_lines"),
    ("expectedDefinition", "expected_definition"),
];

/// Envelope keys the model sometimes echoes back; they are owned by
/// [`GeneratedResource`] itself.
const ENVELOPE_KEYS: &[&str] = &["resourceType", "resource_type", "format"];

/// Never fails: non-object input yields an empty resource.
pub fn reconcile(
    parsed: Value,
    requested_count: Option<u32>,
    resource_type: ResourceType,
) -> GeneratedResource {
    let mut resource = GeneratedResource::new(resource_type, None);

    let Value::Object(mut content) = parsed else {
        tracing::warn!(resource_type = %resource_type, "generation_output_not_object");
        return resource;
    };

    if let Some(Value::String(raw)) = content.get("format") {
        resource.format = Format::parse_lenient(raw);
    }
    for key in ENVELOPE_KEYS {
        content.remove(*key);
    }

    if let Some(requested) = requested_count.filter(|n| *n > 0 && resource_type.is_counted()) {
        let key = resource_type.item_key();
        match content.get_mut(key) {
            Some(Value::Array(items)) => fit_count(items, requested as usize),
            _ => tracing::warn!(key, requested, "generation_items_missing"),
        }
    }

    rename_aliases(&mut content, resource_type);
    resource.content = content;
    resource
}

/// Required fields that are absent or null in `resource`.
pub fn missing_required<'a>(
    resource: &GeneratedResource,
    required: impl IntoIterator<Item = &'a str>,
) -> Vec<&'a str> {
    required
        .into_iter()
        .filter(|name| resource.content.get(*name).is_none_or(Value::is_null))
        .collect()
}

fn fit_count(items: &mut Vec<Value>, requested: usize) {
    let actual = items.len();
    if actual == requested {
        return;
    }

    tracing::warn!(requested, actual, "item_count_mismatch");

    if actual > requested {
        items.truncate(requested);
        return;
    }

    if actual == 0 {
        tracing::warn!(requested, "item_count_unpaddable");
        return;
    }

    for k in 1..=(requested - actual) {
        let mut clone = items[(k - 1) % actual].clone();
        mark_variation(&mut clone, k);
        items.push(clone);
    }
}

fn mark_variation(item: &mut Value, k: usize) {
    let suffix = format!(" (variation {k})");
    match item {
        Value::String(text) => text.push_str(&suffix),
        Value::Object(fields) => {
            let label = LABEL_FIELDS
                .iter()
                .find(|name| fields.get(**name).is_some_and(Value::is_string));
            if let Some(Value::String(text)) = label.and_then(|name| fields.get_mut(*name)) {
                text.push_str(&suffix);
            }
        }
        _ => {}
    }
}

fn rename_aliases(content: &mut Map<String, Value>, resource_type: ResourceType) {
    rename(content, TOP_LEVEL_ALIASES);

    if let Some(Value::Object(science)) = content.get_mut("science_context") {
        rename(science, SCIENCE_CONTEXT_ALIASES);
    }

    if let Some(Value::Array(items)) = content.get_mut(resource_type.item_key()) {
        for item in items.iter_mut() {
            if let Value::Object(fields) = item {
                rename(fields, ITEM_ALIASES);
            }
        }
    }
}

/// Moves each alias onto its canonical key unless the canonical key is already present.
fn rename(map: &mut Map<String, Value>, aliases: &[(&str, &str)]) {
    for (alias, canonical) in aliases {
        if map.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = map.remove(*alias) {
            map.insert((*canonical).to_string(), value);
        }
    }
}
