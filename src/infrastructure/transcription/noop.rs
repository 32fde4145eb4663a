//! No-op transcriber for configurations without a recognizer

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{
    AudioFrame, LiveTranscriber, TranscriptStream, TranscriptionError,
};

/// Transcriber that reports itself unavailable.
///
/// Used when no recognizer API key is configured; the candidate types
/// answers instead of dictating them.
pub struct NoOpTranscriber;

#[async_trait]
impl LiveTranscriber for NoOpTranscriber {
    fn is_available(&self) -> bool {
        false
    }

    async fn start(
        &self,
        _frames: mpsc::UnboundedReceiver<AudioFrame>,
    ) -> Result<TranscriptStream, TranscriptionError> {
        Err(TranscriptionError::Unavailable)
    }

    async fn stop(&self) -> Result<(), TranscriptionError> {
        Ok(())
    }
}
