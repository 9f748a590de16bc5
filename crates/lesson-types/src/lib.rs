mod grade;
mod request;
mod resource;
mod slots;

pub use grade::{Grade, GradeParseError};
pub use request::{GenerationRequest, ValidatedRequest, ValidationError};
pub use resource::{Format, GeneratedResource, ResourceCategory, ResourceType};
pub use slots::{Difficulty, QuestionType, SlotRecord, Subject, Theme};
