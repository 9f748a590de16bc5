/// Folds a sequence of [`crate::TranscriptEvent`]s into one transcript.
///
/// Final segments are committed in arrival order and joined with single
/// spaces. The latest partial is kept separately so a live view can show
/// `committed + partial` while the speaker is still talking.
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuffer {
    committed: String,
    partial: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: &crate::TranscriptEvent) {
        match event {
            crate::TranscriptEvent::Partial { text } => {
                self.partial = normalize(text);
            }
            crate::TranscriptEvent::Final { text } => {
                append(&mut self.committed, &normalize(text));
                self.partial.clear();
            }
        }
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Committed text followed by the in-flight partial, for display.
    pub fn live(&self) -> String {
        let mut live = self.committed.clone();
        append(&mut live, &self.partial);
        live
    }

    /// Ends the session. A trailing partial that never became final is kept:
    /// recognizers commonly stop without finalizing the last phrase.
    pub fn finish(self) -> String {
        self.live()
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn append(buf: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(segment);
}
