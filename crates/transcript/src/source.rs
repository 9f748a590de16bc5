use futures_util::{Stream, StreamExt, stream::BoxStream};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::{TranscriptBuffer, TranscriptEvent};

/// A speech recognizer, as seen by the pipeline: something that yields
/// transcript events until the speaker stops.
///
/// Any `Stream<Item = TranscriptEvent>` is a source, so tests can pass
/// `futures_util::stream::iter(...)` directly.
pub trait SpeechSource {
    fn into_events(self) -> BoxStream<'static, TranscriptEvent>;
}

impl<S> SpeechSource for S
where
    S: Stream<Item = TranscriptEvent> + Send + 'static,
{
    fn into_events(self) -> BoxStream<'static, TranscriptEvent> {
        self.boxed()
    }
}

/// Message-passing source for recognizers that push events from callbacks
/// or another task. The stream ends once every sender is dropped.
pub struct ChannelSource {
    rx: mpsc::Receiver<TranscriptEvent>,
}

impl ChannelSource {
    pub fn new(buffer: usize) -> (mpsc::Sender<TranscriptEvent>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self { rx })
    }
}

impl SpeechSource for ChannelSource {
    fn into_events(self) -> BoxStream<'static, TranscriptEvent> {
        ReceiverStream::new(self.rx).boxed()
    }
}

/// Drains a source into a single transcript string.
pub async fn collect_transcript(source: impl SpeechSource) -> String {
    let mut events = source.into_events();
    let mut buffer = TranscriptBuffer::new();
    let mut count = 0usize;

    while let Some(event) = events.next().await {
        buffer.push(&event);
        count += 1;
    }

    tracing::debug!(events = count, "transcript_collected");
    buffer.finish()
}
