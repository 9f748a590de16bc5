use serde_json::{Map, Value};

use crate::error::Error;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Single-shot client for an OpenAI-compatible `/chat/completions` endpoint
/// running in JSON mode.
#[derive(Clone)]
pub struct GenerationClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    http_client: reqwest::Client,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one completion request and returns the model's JSON object.
    ///
    /// There is no retry: any transport failure or non-success status is
    /// surfaced as [`Error::ServiceUnavailable`].
    pub async fn generate(&self, system: &str, user: &str) -> Result<Map<String, Value>, Error> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ServiceUnavailable {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %text, "generation_request_failed");
            return Err(Error::ServiceUnavailable {
                status: Some(status.as_u16()),
                message: format!("upstream returned {status}"),
            });
        }

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|e| Error::ServiceUnavailable {
                status: Some(status.as_u16()),
                message: format!("unreadable completion body: {e}"),
            })?;

        let content = parsed.into_content().ok_or(Error::EmptyResponse)?;
        parse_object(&content)
    }
}

/// Parses model content as a JSON object, tolerating a surrounding
/// markdown code fence.
pub fn parse_object(content: &str) -> Result<Map<String, Value>, Error> {
    let trimmed = strip_code_fence(content.trim());

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => {
            tracing::error!(raw = %content, "generation_output_malformed");
            Err(Error::MalformedOutput {
                raw: content.to_string(),
            })
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
