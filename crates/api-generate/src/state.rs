use crate::config::GenerateConfig;
use crate::pipeline::{Generator, Pipeline};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pipeline: Pipeline,
}

impl AppState {
    pub(crate) fn new(config: &GenerateConfig) -> Self {
        Self::with_generator(config.client())
    }

    pub(crate) fn with_generator(generator: impl Generator + 'static) -> Self {
        Self {
            pipeline: Pipeline::new(generator),
        }
    }
}
