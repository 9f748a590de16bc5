use edu_transcript::{ChannelSource, TranscriptEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// How stdin lines map onto transcript events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputMode {
    /// Each line is one finished utterance.
    Lines,
    /// Each line is a JSON `TranscriptEvent` (`{"type":"partial","text":...}`).
    Events,
}

pub fn parse_line(line: &str, mode: InputMode) -> Option<TranscriptEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match mode {
        InputMode::Lines => Some(TranscriptEvent::final_text(line)),
        InputMode::Events => match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(error) => {
                tracing::warn!(%error, line, "transcript_event_skipped");
                None
            }
        },
    }
}

/// Spawns a reader task that feeds `reader` into a [`ChannelSource`].
pub fn spawn_reader<R>(reader: R, mode: InputMode) -> ChannelSource
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, source) = ChannelSource::new(64);

    tokio::spawn(async move {
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(event) = parse_line(&line, mode) {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    tracing::error!(%error, "stdin_read_failed");
                    break;
                }
            }
        }
    });

    source
}
