use serde::{Deserialize, Serialize};

/// Provider-agnostic speech-to-text output.
///
/// Convert whatever a recognizer emits (browser callbacks, websocket frames,
/// a local model) into `TranscriptEvent`s before handing them to the
/// pipeline. A `Partial` replaces the previous partial; a `Final` commits
/// its text and clears the partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranscriptEvent {
    Partial { text: String },
    Final { text: String },
}

impl TranscriptEvent {
    pub fn partial(text: impl Into<String>) -> Self {
        Self::Partial { text: text.into() }
    }

    pub fn final_text(text: impl Into<String>) -> Self {
        Self::Final { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Partial { text } | Self::Final { text } => text,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }
}
