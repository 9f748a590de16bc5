//! Intent and slot extraction for spoken or typed resource requests.
//!
//! Two independent passes run over the same transcript:
//! [`classify_resource`] decides *what* is being asked for, and
//! [`extract_slots`] pulls out *for whom and about what*. Both are pure and
//! driven by ordered pattern tables where the first matching rule wins.

mod classify;
mod extract;
mod params;
mod rules;
mod tables;

pub use classify::classify_resource;
pub use extract::extract_slots;

use edu_lesson_types::{ResourceCategory, ResourceType, SlotRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub category: ResourceCategory,
    pub resource_type: ResourceType,
    pub slots: SlotRecord,
}

pub fn analyze(transcript: &str) -> Intent {
    let category = classify_resource(transcript);
    Intent {
        category,
        resource_type: category.resource_type(),
        slots: extract_slots(transcript),
    }
}
