//! Recording port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::audio::AnswerAudio;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Recording already in progress")]
    AlreadyRecording,

    #[error("No recording in progress")]
    NotRecording,

    #[error("No audio data captured")]
    NoAudioCaptured,

    #[error("No audio device available")]
    NoAudioDevice,
}

/// A block of captured microphone audio: mono 16-bit PCM at the device rate
#[derive(Debug, Clone)]
pub struct AudioFrame {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioFrame {
    /// Duration of this frame in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }
}

/// Sender half of a live audio tap. Frames pushed here mirror what the
/// recorder is buffering, so a transcriber can listen in while the
/// recording is still running.
pub type FrameSink = mpsc::UnboundedSender<AudioFrame>;

/// Port for user-controlled microphone recording.
///
/// One recording may be active at a time. The captured audio is finalized
/// into a single WAV object on `stop`.
#[async_trait]
pub trait VoiceRecorder: Send + Sync {
    /// Start capturing from the microphone.
    ///
    /// # Arguments
    /// * `tap` - Optional sink that receives captured frames live
    async fn start(&self, tap: Option<FrameSink>) -> Result<(), RecordingError>;

    /// Stop capturing and return the finalized audio.
    async fn stop(&self) -> Result<AnswerAudio, RecordingError>;

    /// Stop capturing and discard the audio.
    async fn cancel(&self) -> Result<(), RecordingError>;

    /// Check if currently recording
    fn is_recording(&self) -> bool;

    /// Get elapsed recording time in milliseconds
    fn elapsed_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_duration() {
        let frame = AudioFrame {
            samples: vec![0i16; 16_000],
            sample_rate: 16_000,
        };
        assert_eq!(frame.duration_ms(), 1000);
    }

    #[test]
    fn frame_duration_zero_rate() {
        let frame = AudioFrame {
            samples: vec![0i16; 100],
            sample_rate: 0,
        };
        assert_eq!(frame.duration_ms(), 0);
    }
}
