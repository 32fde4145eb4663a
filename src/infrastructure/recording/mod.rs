//! Recording adapters

mod cpal_recorder;
mod wav_encoder;

pub use cpal_recorder::CpalRecorder;
pub use wav_encoder::{encode_answer_wav, TARGET_SAMPLE_RATE};
