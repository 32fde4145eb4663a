//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_cue;
pub mod coach;
pub mod config;
pub mod recorder;
pub mod transcriber;

// Re-export common types
pub use audio_cue::{AudioCue, AudioCueError, AudioCueType};
pub use coach::{AnswerOutcome, CoachService, ServiceError, SessionStart};
pub use config::ConfigStore;
pub use recorder::{AudioFrame, FrameSink, RecordingError, VoiceRecorder};
pub use transcriber::{LiveTranscriber, TranscriptEvent, TranscriptStream, TranscriptionError};
