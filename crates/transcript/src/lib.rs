pub mod buffer;
pub mod input;
pub mod source;

pub use buffer::TranscriptBuffer;
pub use input::TranscriptEvent;
pub use source::{ChannelSource, SpeechSource, collect_transcript};
