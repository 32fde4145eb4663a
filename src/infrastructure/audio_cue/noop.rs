//! Silent cue adapter for sessions with recording tones turned off

use async_trait::async_trait;

use crate::application::ports::{AudioCue, AudioCueError, AudioCueType};

/// Cue player that swallows every cue.
///
/// Injected when `audio_cues` is off, so the controller can always play
/// cues around recording transitions without checking the setting.
pub struct NoOpAudioCue;

#[async_trait]
impl AudioCue for NoOpAudioCue {
    async fn play(&self, _cue_type: AudioCueType) -> Result<(), AudioCueError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_cues_are_silent_successes() {
        let cue = NoOpAudioCue;
        for cue_type in [
            AudioCueType::RecordingStart,
            AudioCueType::RecordingStop,
            AudioCueType::RecordingCancel,
        ] {
            assert!(cue.play(cue_type).await.is_ok());
        }
    }
}
