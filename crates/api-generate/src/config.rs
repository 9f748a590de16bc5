use edu_llm_client::GenerationClient;

use crate::env::GenerationEnv;

#[derive(Clone)]
pub struct GenerateConfig {
    pub env: GenerationEnv,
}

impl GenerateConfig {
    pub fn new(env: &GenerationEnv) -> Self {
        Self { env: env.clone() }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.env.openai_model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.env.openai_base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.env.generation_temperature = temperature;
        self
    }

    pub fn client(&self) -> GenerationClient {
        GenerationClient::new(&self.env.openai_base_url, self.env.openai_api_key.clone())
            .with_model(&self.env.openai_model)
            .with_temperature(self.env.generation_temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_env() {
        let env = GenerationEnv {
            openai_api_key: Some("k".into()),
            ..Default::default()
        };
        let client = GenerateConfig::new(&env).with_model("gpt-4o").client();

        assert_eq!(client.model(), "gpt-4o");
        assert!(client.is_configured());
    }

    #[test]
    fn missing_key_is_unconfigured() {
        let client = GenerateConfig::new(&GenerationEnv::default()).client();
        assert!(!client.is_configured());
        assert_eq!(client.model(), edu_llm_client::DEFAULT_MODEL);
    }
}
