use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("generation API key is not configured")]
    MissingApiKey,

    #[error("generation service unavailable: {message}")]
    ServiceUnavailable { status: Option<u16>, message: String },

    #[error("generation returned no content")]
    EmptyResponse,

    #[error("generation returned content that is not a JSON object")]
    MalformedOutput { raw: String },
}

impl Error {
    /// Missing key, or the upstream rejected the one we sent.
    pub fn is_credentials(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey
                | Self::ServiceUnavailable {
                    status: Some(401 | 403),
                    ..
                }
        )
    }
}
