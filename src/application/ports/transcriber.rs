//! Live transcription port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::recorder::AudioFrame;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Live transcription is not available (no recognizer API key configured)")]
    Unavailable,

    #[error("Transcription already running")]
    AlreadyRunning,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Recognizer error: {0}")]
    ApiError(String),

    #[error("Failed to parse recognizer response: {0}")]
    ParseError(String),
}

/// An event from the recognition engine.
///
/// Interim hypotheses are provisional and replace each other; a final
/// segment is committed permanently to the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    Interim(String),
    Final(String),
}

/// Receiver half of a live transcript stream. Closes when the recognizer
/// finishes draining after `stop`.
pub type TranscriptStream = mpsc::UnboundedReceiver<TranscriptEvent>;

/// Port for live speech-to-text over a recording in progress.
///
/// An injected capability: platforms or configurations without a recognizer
/// use a no-op implementation that reports itself unavailable, and the
/// candidate types instead.
#[async_trait]
pub trait LiveTranscriber: Send + Sync {
    /// Whether live transcription can run at all in this configuration.
    fn is_available(&self) -> bool;

    /// Start transcribing the given audio frame stream.
    ///
    /// # Returns
    /// A stream of interim and final transcript events. The stream closes
    /// once the frame source ends and the last segment has been finalized.
    async fn start(
        &self,
        frames: mpsc::UnboundedReceiver<AudioFrame>,
    ) -> Result<TranscriptStream, TranscriptionError>;

    /// Stop transcribing. Pending audio is finalized before the event
    /// stream closes.
    async fn stop(&self) -> Result<(), TranscriptionError>;
}

// Allow the implementation to be chosen at runtime
#[async_trait]
impl LiveTranscriber for Box<dyn LiveTranscriber> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    async fn start(
        &self,
        frames: mpsc::UnboundedReceiver<AudioFrame>,
    ) -> Result<TranscriptStream, TranscriptionError> {
        (**self).start(frames).await
    }

    async fn stop(&self) -> Result<(), TranscriptionError> {
        (**self).stop().await
    }
}
