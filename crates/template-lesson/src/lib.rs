//! Response schemas and prompt assembly for lesson resources.
//!
//! The registry maps a `(resource type, subject, format)` key to a typed
//! [`ResponseSchema`]; [`assemble_prompt`] turns a slot record plus that
//! schema into the system and user prompts sent to the model.

mod instructions;
mod prompt;
pub mod registry;
pub mod schema;

pub use instructions::get_instructions;
pub use prompt::{Prompt, assemble_prompt};
pub use registry::{SchemaId, get_schema};
pub use schema::{Field, Node, ResponseSchema};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to render prompt: {0}")]
    Render(#[from] askama::Error),
}
