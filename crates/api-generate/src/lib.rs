mod config;
mod env;
mod error;
mod openapi;
mod pipeline;
mod routes;
mod state;

pub use config::GenerateConfig;
pub use env::{GenerationEnv, filter_empty};
pub use error::{ErrorDetails, ErrorResponse, GenerateError};
pub use openapi::openapi;
pub use pipeline::{Generator, GeneratorFuture, Pipeline};
pub use routes::{router, router_with_generator};
