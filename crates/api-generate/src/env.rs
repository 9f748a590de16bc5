use serde::{Deserialize, Deserializer};

fn default_openai_base_url() -> String {
    edu_llm_client::OPENAI_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    edu_llm_client::DEFAULT_MODEL.to_string()
}

fn default_generation_temperature() -> f32 {
    edu_llm_client::DEFAULT_TEMPERATURE
}

#[derive(Clone, Deserialize)]
pub struct GenerationEnv {
    #[serde(default, deserialize_with = "filter_empty")]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_generation_temperature")]
    pub generation_temperature: f32,
}

impl Default for GenerationEnv {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            generation_temperature: default_generation_temperature(),
        }
    }
}

/// Treats an empty or whitespace-only variable as unset.
pub fn filter_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
