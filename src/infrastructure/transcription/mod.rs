//! Live transcription adapters

mod noop;
mod remote;

pub use noop::NoOpTranscriber;
pub use remote::RemoteLiveTranscriber;
