//! Infrastructure layer: adapter implementations

pub mod audio_cue;
pub mod coach;
pub mod config;
pub mod recording;
pub mod transcription;

pub use audio_cue::{NoOpAudioCue, RodioAudioCue};
pub use coach::HttpCoachService;
pub use config::XdgConfigStore;
pub use recording::CpalRecorder;
pub use transcription::{NoOpTranscriber, RemoteLiveTranscriber};
